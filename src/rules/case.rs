//! Letter case rules.

use secrecy::{ExposeSecret, SecretString};

use super::{Rule, RuleResult};

pub const UPPERCASE_REASON: &str = "Password must contain at least 1 Upper letter!";
pub const LOWERCASE_REASON: &str = "Password must contain at least 1 Lower letter!";

#[derive(Debug, Clone, Copy, Default)]
pub struct UppercaseRule;

#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseRule;

impl Rule for UppercaseRule {
    fn name(&self) -> &'static str {
        "uppercase"
    }

    fn check(&self, password: &SecretString) -> RuleResult {
        if password.expose_secret().chars().any(char::is_uppercase) {
            return Ok(None);
        }
        Ok(Some(UPPERCASE_REASON.to_string()))
    }
}

impl Rule for LowercaseRule {
    fn name(&self) -> &'static str {
        "lowercase"
    }

    fn check(&self, password: &SecretString) -> RuleResult {
        if password.expose_secret().chars().any(char::is_lowercase) {
            return Ok(None);
        }
        Ok(Some(LOWERCASE_REASON.to_string()))
    }
}

//! Digit rule - requires at least one ASCII digit.

use secrecy::{ExposeSecret, SecretString};

use super::{Rule, RuleResult};

pub const DIGIT_REASON: &str = "Password must contain at least 1 number!";

#[derive(Debug, Clone, Copy, Default)]
pub struct DigitRule;

impl Rule for DigitRule {
    fn name(&self) -> &'static str {
        "digit"
    }

    fn check(&self, password: &SecretString) -> RuleResult {
        if password.expose_secret().chars().any(|c| c.is_ascii_digit()) {
            return Ok(None);
        }
        Ok(Some(DIGIT_REASON.to_string()))
    }
}

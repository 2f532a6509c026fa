//! Special character rule - requires a character that is neither a letter
//! nor a number.

use secrecy::{ExposeSecret, SecretString};

use super::{Rule, RuleResult};

pub const SPECIAL_REASON: &str = "Password must contain at least 1 special character!";

#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialCharRule;

impl Rule for SpecialCharRule {
    fn name(&self) -> &'static str {
        "special"
    }

    fn check(&self, password: &SecretString) -> RuleResult {
        if password.expose_secret().chars().any(|c| !c.is_alphanumeric()) {
            return Ok(None);
        }
        Ok(Some(SPECIAL_REASON.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_special_rule_with_symbol() {
        assert_eq!(SpecialCharRule.check(&secret("a#bc")).unwrap(), None);
    }

    #[test]
    fn test_special_rule_whitespace_counts() {
        assert_eq!(SpecialCharRule.check(&secret("ab cd")).unwrap(), None);
    }

    #[test]
    fn test_special_rule_without_symbol() {
        assert_eq!(
            SpecialCharRule.check(&secret("abcd")).unwrap(),
            Some(SPECIAL_REASON.to_string())
        );
    }

    #[test]
    fn test_special_rule_unicode_letters_are_not_special() {
        assert!(SpecialCharRule.check(&secret("żółw123")).unwrap().is_some());
    }
}

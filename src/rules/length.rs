//! Length rule - checks password minimum length.

use secrecy::{ExposeSecret, SecretString};

use super::{Rule, RuleResult};
use crate::config::DEFAULT_MIN_LENGTH;

/// Reported for any configured minimum, not only the default.
pub const LENGTH_REASON: &str = "Password must contain at least 8 characters!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRule {
    min_length: usize,
}

impl LengthRule {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for LengthRule {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH)
    }
}

impl Rule for LengthRule {
    fn name(&self) -> &'static str {
        "length"
    }

    /// Counts characters, not bytes.
    fn check(&self, password: &SecretString) -> RuleResult {
        if password.expose_secret().chars().count() < self.min_length {
            return Ok(Some(LENGTH_REASON.to_string()));
        }
        Ok(None)
    }
}

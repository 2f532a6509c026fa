//! Breach rule - rejects passwords present in a breach range database.

use secrecy::{ExposeSecret, SecretString};

use super::{Rule, RuleResult};
use crate::breach::{hash_password, split_hash, RangeSource};

pub const LEAKED_REASON: &str = "This password leaked before!";

pub struct BreachRule {
    source: Box<dyn RangeSource>,
}

impl BreachRule {
    pub fn new(source: impl RangeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

impl Rule for BreachRule {
    fn name(&self) -> &'static str {
        "breach"
    }

    fn check(&self, password: &SecretString) -> RuleResult {
        let hash = hash_password(password.expose_secret());
        let (prefix, suffix) = split_hash(&hash);

        let range = self.source.range(prefix)?;
        if range.contains_suffix(suffix) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Hash suffix found under prefix {} ({:?} occurrences)",
                prefix,
                range.count_for(suffix)
            );
            return Ok(Some(LEAKED_REASON.to_string()));
        }
        Ok(None)
    }
}

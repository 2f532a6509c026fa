//! Composite password validator - runs the rule set in order, fail-fast.

use secrecy::SecretString;

#[cfg(feature = "async")]
use std::sync::Arc;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::breach::{CachedRangeSource, LookupError, PwnedRangeClient, RangeSource};
use crate::config::{ConfigError, ValidatorConfig};
use crate::rules::{
    BreachRule, DigitRule, LengthRule, LowercaseRule, Rule, SpecialCharRule, UppercaseRule,
};

/// Result of validating one password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    /// Reason reported by the first rule that rejected the password.
    Invalid(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(reason) => Some(reason),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Ordered rule pipeline.
///
/// Rules run as Length, Digit, Special, Upper, Lower, Breach; the first
/// rejection wins.
pub struct PasswordValidator {
    rules: Vec<Box<dyn Rule>>,
}

impl PasswordValidator {
    /// Builds the standard pipeline with an HTTP breach lookup.
    pub fn new(config: &ValidatorConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let client = PwnedRangeClient::new(config)?;

        let validator = if config.cache_ranges {
            Self::with_range_source(config, CachedRangeSource::new(client))?
        } else {
            Self::with_range_source(config, client)?
        };
        Ok(validator)
    }

    /// Builds the standard pipeline around any range source.
    pub fn with_range_source(
        config: &ValidatorConfig,
        source: impl RangeSource + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(LengthRule::new(config.min_length)),
            Box::new(DigitRule),
            Box::new(SpecialCharRule),
            Box::new(UppercaseRule),
            Box::new(LowercaseRule),
            Box::new(BreachRule::new(source)),
        ];
        Ok(Self::from_rules(rules))
    }

    pub fn from_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Validates a password against every rule in order.
    ///
    /// # Returns
    /// - `Ok(Valid)` if all rules pass
    /// - `Ok(Invalid(reason))` with the first failing rule's reason
    /// - `Err(_)` if the breach lookup could not be performed
    pub fn validate(&self, password: &SecretString) -> Result<ValidationOutcome, LookupError> {
        for rule in &self.rules {
            if let Some(outcome) = run_rule(rule.as_ref(), password)? {
                return Ok(outcome);
            }
        }
        Ok(ValidationOutcome::Valid)
    }

    /// Like [`validate`](Self::validate) but checks `token` before each
    /// rule. Returns `Ok(None)` if cancelled.
    #[cfg(feature = "async")]
    pub fn validate_cancellable(
        &self,
        password: &SecretString,
        token: &CancellationToken,
    ) -> Result<Option<ValidationOutcome>, LookupError> {
        for rule in &self.rules {
            if token.is_cancelled() {
                #[cfg(feature = "tracing")]
                tracing::debug!("Validation cancelled before rule {}", rule.name());
                return Ok(None);
            }

            if let Some(outcome) = run_rule(rule.as_ref(), password)? {
                return Ok(Some(outcome));
            }
        }
        Ok(Some(ValidationOutcome::Valid))
    }
}

fn run_rule(
    rule: &dyn Rule,
    password: &SecretString,
) -> Result<Option<ValidationOutcome>, LookupError> {
    match rule.check(password) {
        Ok(Some(reason)) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("Password rejected by rule {}", rule.name());
            Ok(Some(ValidationOutcome::Invalid(reason)))
        }
        Ok(None) => Ok(None),
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Rule {} could not be evaluated: {}", rule.name(), e);
            Err(e)
        }
    }
}

/// Validates on the blocking pool and sends the result via channel.
///
/// Nothing is sent if the token is cancelled before validation finishes.
#[cfg(feature = "async")]
pub async fn validate_password_tx(
    validator: Arc<PasswordValidator>,
    password: SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<Result<ValidationOutcome, LookupError>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("validation is about to start...");

    let joined = tokio::task::spawn_blocking(move || {
        validator
            .validate_cancellable(&password, &token)
            .transpose()
    })
    .await;

    let result = match joined {
        Ok(Some(result)) => result,
        Ok(None) => return,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Validation task failed: {}", _e);
            return;
        }
    };

    if let Err(_e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password validation result: {}", _e);
    }
}

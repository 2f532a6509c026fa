//! Password validation rules
//!
//! Each rule judges one aspect of a password and either passes or
//! reports a human-readable reason.

mod breach;
mod case;
mod digit;
mod length;
mod special;

pub use breach::{BreachRule, LEAKED_REASON};
pub use case::{LowercaseRule, UppercaseRule, LOWERCASE_REASON, UPPERCASE_REASON};
pub use digit::{DigitRule, DIGIT_REASON};
pub use length::{LengthRule, LENGTH_REASON};
pub use special::{SpecialCharRule, SPECIAL_REASON};

use secrecy::SecretString;

use crate::breach::LookupError;

/// Result type for rule checks.
/// - `Ok(Some(reason))` - Rule rejected the password with reason
/// - `Ok(None)` - Rule passed
/// - `Err(_)` - The rule could not be evaluated
pub type RuleResult = Result<Option<String>, LookupError>;

pub trait Rule: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn check(&self, password: &SecretString) -> RuleResult;
}

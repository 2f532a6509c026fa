//! Rule-based password validation library
//!
//! Validates passwords against a fixed, ordered rule set (minimum length,
//! digit, special character, upper and lower case letters) and a
//! k-anonymity breach lookup. The first failing rule's reason is reported.
//!
//! # Features
//!
//! - `async` (default): Enables cancellable validation and a channel-based helper
//! - `tracing`: Enables logging via tracing crate
//! - `cli`: Builds the `pwd-validator` batch binary
//!
//! # Environment Variables
//!
//! - `PWD_VALIDATOR_MIN_LENGTH`: Minimum password length (default: 8)
//! - `PWD_VALIDATOR_RANGE_URL`: Breach range endpoint
//!   (default: `https://api.pwnedpasswords.com/range`)
//! - `PWD_VALIDATOR_TIMEOUT_SECS`: Breach request timeout (default: 10)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_validator::{PasswordValidator, ValidatorConfig, ValidationOutcome};
//! use secrecy::SecretString;
//!
//! let validator = PasswordValidator::new(&ValidatorConfig::from_env())
//!     .expect("Failed to build validator");
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! match validator.validate(&password) {
//!     Ok(ValidationOutcome::Valid) => println!("accepted"),
//!     Ok(ValidationOutcome::Invalid(reason)) => println!("rejected: {reason}"),
//!     Err(e) => eprintln!("breach lookup failed: {e}"),
//! }
//! ```

// Internal modules
mod batch;
mod breach;
mod config;
mod rules;
mod validator;

// Public API
pub use batch::{validate_batch, validate_file, BatchError, BatchSummary};
pub use breach::{
    hash_password, split_hash, BreachRange, CachedRangeSource, LookupError, PwnedRangeClient,
    RangeSource,
};
pub use config::{ConfigError, ValidatorConfig, DEFAULT_MIN_LENGTH, DEFAULT_RANGE_URL};
pub use rules::{
    BreachRule, DigitRule, LengthRule, LowercaseRule, Rule, RuleResult, SpecialCharRule,
    UppercaseRule, DIGIT_REASON, LEAKED_REASON, LENGTH_REASON, LOWERCASE_REASON,
    SPECIAL_REASON, UPPERCASE_REASON,
};
pub use validator::{BuildError, PasswordValidator, ValidationOutcome};

#[cfg(feature = "async")]
pub use validator::validate_password_tx;

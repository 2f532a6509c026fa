//! Batch driver
//!
//! Reads one candidate password per line, keeps the accepted ones and
//! reports the rejected ones with their reason.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use thiserror::Error;

use crate::validator::{PasswordValidator, ValidationOutcome};

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Batch I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub accepted: usize,
    pub rejected: usize,
    /// Candidates whose breach lookup failed.
    pub errored: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected + self.errored
    }
}

/// Validates every non-blank line of `input`.
///
/// Candidates are trimmed before validation. Accepted lines are written to
/// `output` as read; rejected and errored lines go to `diagnostics` with
/// their reason. A failed breach lookup does not stop the batch.
pub fn validate_batch<R, W, D>(
    validator: &PasswordValidator,
    input: R,
    output: &mut W,
    diagnostics: &mut D,
) -> Result<BatchSummary, BatchError>
where
    R: BufRead,
    W: Write,
    D: Write,
{
    let mut summary = BatchSummary::default();

    for line in input.lines() {
        let line = line?;
        let candidate = line.trim();
        if candidate.is_empty() {
            continue;
        }

        let password = SecretString::new(candidate.to_string().into());
        match validator.validate(&password) {
            Ok(ValidationOutcome::Valid) => {
                writeln!(output, "{line}")?;
                summary.accepted += 1;
            }
            Ok(ValidationOutcome::Invalid(reason)) => {
                writeln!(diagnostics, "{candidate} {reason}")?;
                summary.rejected += 1;
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Breach lookup failed, candidate skipped: {}", e);
                writeln!(diagnostics, "{candidate} error: {e}")?;
                summary.errored += 1;
            }
        }
    }

    output.flush()?;

    #[cfg(feature = "tracing")]
    tracing::info!(
        "Batch finished: {} accepted, {} rejected, {} errored",
        summary.accepted,
        summary.rejected,
        summary.errored
    );

    Ok(summary)
}

/// Validates `input_path` and appends accepted passwords to `output_path`.
///
/// Rejections are reported on stderr.
pub fn validate_file<P, Q>(
    validator: &PasswordValidator,
    input_path: P,
    output_path: Q,
) -> Result<BatchSummary, BatchError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input_path = input_path.as_ref();
    if !input_path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Batch input not found: {:?}", input_path);
        return Err(BatchError::FileNotFound(input_path.to_path_buf()));
    }

    let input = BufReader::new(File::open(input_path)?);
    let mut output = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_path.as_ref())?;
    let mut diagnostics = std::io::stderr().lock();

    validate_batch(validator, input, &mut output, &mut diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breach::{BreachRange, LookupError, RangeSource};
    use crate::config::ValidatorConfig;
    use crate::rules::{LEAKED_REASON, LENGTH_REASON};
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn validator(source: impl RangeSource + 'static) -> PasswordValidator {
        PasswordValidator::with_range_source(&ValidatorConfig::default(), source).unwrap()
    }

    fn clean_source() -> impl RangeSource {
        |_: &str| -> Result<BreachRange, LookupError> { Ok(BreachRange::default()) }
    }

    fn run(v: &PasswordValidator, input: &str) -> (BatchSummary, String, String) {
        let mut output = Vec::new();
        let mut diagnostics = Vec::new();
        let summary =
            validate_batch(v, Cursor::new(input), &mut output, &mut diagnostics).unwrap();
        (
            summary,
            String::from_utf8(output).unwrap(),
            String::from_utf8(diagnostics).unwrap(),
        )
    }

    #[test]
    fn test_batch_partitions_candidates() {
        let v = validator(clean_source());
        let (summary, output, diagnostics) =
            run(&v, "Albertronix4#!@!!\nAla\r\nSecond#Good9\n");

        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.total(), 3);
        assert_eq!(output, "Albertronix4#!@!!\nSecond#Good9\n");
        assert_eq!(diagnostics, format!("Ala {}\n", LENGTH_REASON));
    }

    #[test]
    fn test_batch_trims_and_skips_blank_lines() {
        let v = validator(clean_source());
        let (summary, output, _) = run(&v, "\n   \n  Albertronix4#!@!!  \n");

        assert_eq!(summary.total(), 1);
        assert_eq!(summary.accepted, 1);
        assert_eq!(output, "  Albertronix4#!@!!  \n");
    }

    #[test]
    fn test_batch_reports_leaked() {
        let v = validator(|_: &str| -> Result<BreachRange, LookupError> {
            BreachRange::parse("49FA14AFB7A97DF31BC7872CC023CC5ABF7:2")
        });
        let (summary, output, diagnostics) = run(&v, "Albert1!\n");

        assert_eq!(summary.rejected, 1);
        assert!(output.is_empty());
        assert_eq!(diagnostics, format!("Albert1! {}\n", LEAKED_REASON));
    }

    #[test]
    fn test_batch_continues_after_lookup_error() {
        let v = validator(|prefix: &str| -> Result<BreachRange, LookupError> {
            if prefix == "12284" {
                Err(LookupError::Status(503))
            } else {
                Ok(BreachRange::default())
            }
        });
        let (summary, output, diagnostics) = run(&v, "Albert1!\nAlbertronix4#!@!!\n");

        assert_eq!(summary.errored, 1);
        assert_eq!(summary.accepted, 1);
        assert_eq!(output, "Albertronix4#!@!!\n");
        assert!(diagnostics.starts_with("Albert1! error:"));
    }

    #[test]
    fn test_validate_file_appends_output() {
        let v = validator(clean_source());

        let mut input = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(input, "Albertronix4#!@!!").expect("Failed to write");
        writeln!(input, "abcd").expect("Failed to write");

        let mut output = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(output, "existing#Line1").expect("Failed to write");

        let summary = validate_file(&v, input.path(), output.path()).unwrap();
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected, 1);

        let written = std::fs::read_to_string(output.path()).unwrap();
        assert_eq!(written, "existing#Line1\nAlbertronix4#!@!!\n");
    }

    #[test]
    fn test_validate_file_missing_input() {
        let v = validator(clean_source());
        let output = NamedTempFile::new().expect("Failed to create temp file");

        let result = validate_file(&v, "/nonexistent/path/passwords.txt", output.path());
        assert!(matches!(result, Err(BatchError::FileNotFound(_))));
    }
}

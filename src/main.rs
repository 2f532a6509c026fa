use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pwd_validator::{validate_file, PasswordValidator, ValidatorConfig};

/// Filter a password list down to the ones passing every rule
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Candidate passwords, one per line
    #[arg(short, long, default_value = "passwords.txt")]
    input: String,

    /// Accepted passwords are appended here
    #[arg(short, long, default_value = "safe_passwords.txt")]
    output: String,

    /// Minimum password length (overrides PWD_VALIDATOR_MIN_LENGTH)
    #[arg(short, long)]
    min_length: Option<usize>,

    /// Query the breach endpoint for every password, even repeated prefixes
    #[arg(long)]
    no_cache: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    let mut config = ValidatorConfig::from_env().with_cache(!args.no_cache);
    if let Some(min) = args.min_length {
        config = config.with_min_length(min);
    }

    let validator = PasswordValidator::new(&config).context("Failed to build validator")?;

    info!("Validating passwords from {}", args.input);
    let summary = validate_file(&validator, &args.input, &args.output)
        .with_context(|| format!("Failed to process {}", args.input))?;

    info!(
        "{} of {} passwords accepted, written to {}",
        summary.accepted,
        summary.total(),
        args.output
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

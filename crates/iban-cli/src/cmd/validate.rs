//! Implementation of `iban validate <IBAN>...` and `iban validate --file`.
//!
//! Prints one line per IBAN to stdout, in input order:
//! - human: `<iban>\t<outcome>`
//! - json: `{"iban": ..., "outcome": ..., "valid": ...}` (NDJSON)
//!
//! A `<valid> valid, <invalid> invalid` summary goes to stderr in human mode
//! unless `--quiet` is set.
//!
//! Exit codes:
//! - 0 = every IBAN is valid
//! - 1 = at least one IBAN is invalid
//! - 2 = the input or the country rules could not be read
use iban_core::{CountryRules, ValidationOutcome, validate};

use crate::OutputFormat;
use crate::cmd::write_lines;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `validate` command over `ibans`.
///
/// # Errors
///
/// - [`CliError::InvalidIbans`] when any IBAN fails validation.
/// - [`CliError::IoError`] when stdout cannot be written.
pub fn run(
    rules: &CountryRules,
    ibans: &[String],
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let outcomes: Vec<(&str, ValidationOutcome)> = ibans
        .iter()
        .map(|iban| {
            let outcome = validate(rules, iban);
            tracing::debug!(iban = %iban, outcome = %outcome, "checked");
            (iban.as_str(), outcome)
        })
        .collect();

    write_lines(outcomes.iter().map(|(iban, outcome)| render(iban, *outcome, format)))?;

    let total = outcomes.len();
    let invalid = outcomes.iter().filter(|(_, o)| !o.is_valid()).count();

    if format == OutputFormat::Human && !quiet {
        eprintln!("{} valid, {invalid} invalid", total - invalid);
    }

    if invalid > 0 {
        Err(CliError::InvalidIbans { invalid, total })
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn render(iban: &str, outcome: ValidationOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format!("{iban}\t{outcome}"),
        OutputFormat::Json => serde_json::json!({
            "iban": iban,
            "outcome": outcome,
            "valid": outcome.is_valid(),
        })
        .to_string(),
    }
}

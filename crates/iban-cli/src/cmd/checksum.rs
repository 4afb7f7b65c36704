//! Implementation of `iban checksum <IBAN>`.
//!
//! Prints the two check digits the IBAN should carry, whatever digits it
//! currently has in positions 3 and 4.
use iban_core::checksum;

use crate::OutputFormat;
use crate::cmd::write_lines;
use crate::error::CliError;

/// Runs the `checksum` command.
///
/// # Errors
///
/// [`CliError::CannotConstruct`] when the IBAN is shorter than four
/// characters or contains anything but ASCII letters and digits.
pub fn run(iban: &str, format: OutputFormat) -> Result<(), CliError> {
    let Some(check) = checksum(iban) else {
        return Err(CliError::CannotConstruct {
            detail: format!("no check digits for {iban:?}"),
        });
    };
    tracing::debug!(iban, check, "computed check digits");

    let line = match format {
        OutputFormat::Human => format!("{check:02}"),
        OutputFormat::Json => serde_json::json!({
            "iban": iban,
            "check_digits": format!("{check:02}"),
        })
        .to_string(),
    };
    write_lines([line])
}

/// Command module for the `iban` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the loaded country rules and parsed arguments and returns
/// `Ok(())` on success or a [`crate::error::CliError`] on failure.
use std::io::Write as _;

use crate::error::CliError;

pub mod checksum;
pub mod countries;
pub mod create;
pub mod validate;

/// Writes `lines` to stdout, one per line, through a single lock.
pub(crate) fn write_lines<I>(lines: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = String>,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{line}").map_err(stdout_error)?;
    }
    out.flush().map_err(stdout_error)
}

fn stdout_error(e: std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}

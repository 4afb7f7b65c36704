//! Implementation of `iban create <ACCOUNT> [--bic <BIC>] [--country <CC>]`.
//!
//! Prints the constructed IBAN to stdout: the bare string in human mode, or
//! `{"iban": ...}` in JSON mode.
//!
//! Exit codes:
//! - 0 = an IBAN was printed
//! - 1 = nothing could be built, or the country has no rule
use iban_core::{CountryRules, CreateError, create};

use crate::OutputFormat;
use crate::cmd::write_lines;
use crate::error::{CliError, error_chain};

/// Runs the `create` command.
///
/// # Errors
///
/// - [`CliError::UnknownCountry`] when the resolved country has no rule.
/// - [`CliError::CannotConstruct`] when the input yields no IBAN.
pub fn run(
    rules: &CountryRules,
    account: &str,
    bic: Option<&str>,
    country: Option<&str>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let iban = create(rules, account, bic, country).map_err(|e| match e {
        CreateError::CountryNotFound(missing) => CliError::UnknownCountry { code: missing.code },
        CreateError::Unencodable { iban } => CliError::CannotConstruct {
            detail: format!("{iban:?} contains characters other than ASCII letters and digits"),
        },
        CreateError::Load(e) => CliError::DatasetLoad {
            source: "registry".to_owned(),
            detail: error_chain(&e),
        },
    })?;

    if iban.is_empty() {
        return Err(CliError::CannotConstruct {
            detail: empty_reason(account, bic),
        });
    }

    let line = match format {
        OutputFormat::Human => iban,
        OutputFormat::Json => serde_json::json!({ "iban": iban }).to_string(),
    };
    write_lines([line])
}

/// Explains an empty result from [`create`].
fn empty_reason(account: &str, bic: Option<&str>) -> String {
    if account.is_empty() {
        "account number is empty".to_owned()
    } else if bic.is_some_and(|b| !b.is_empty()) {
        "BIC must be 8 or 11 characters".to_owned()
    } else {
        "no BIC or country code given".to_owned()
    }
}

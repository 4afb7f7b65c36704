//! Implementation of `iban countries [<CC>]`.
//!
//! Lists the loaded country rules in country-code order. Human mode prints
//! `CC\tlength\tstructure`; JSON mode prints one serialized rule per line.
use iban_core::{CountryRule, CountryRules};

use crate::OutputFormat;
use crate::cmd::write_lines;
use crate::error::CliError;

/// Runs the `countries` command, optionally for a single `code`.
///
/// # Errors
///
/// - [`CliError::UnknownCountry`] when `code` has no rule.
/// - [`CliError::IoError`] when stdout cannot be written.
pub fn run(rules: &CountryRules, code: Option<&str>, format: OutputFormat) -> Result<(), CliError> {
    let selected: Vec<&CountryRule> = match code {
        Some(code) => vec![rules.get(code).map_err(|e| CliError::UnknownCountry { code: e.code })?],
        None => rules.iter().collect(),
    };

    let lines = selected
        .into_iter()
        .map(|rule| render(rule, format))
        .collect::<Result<Vec<_>, _>>()?;
    write_lines(lines)
}

fn render(rule: &CountryRule, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Human => Ok(format!(
            "{}\t{}\t{}",
            rule.country_code(),
            rule.total_length(),
            rule.inner_structure()
        )),
        OutputFormat::Json => serde_json::to_string(rule).map_err(|e| CliError::IoError {
            source: "stdout".to_owned(),
            detail: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn human_row_for_netherlands() {
        let rules = CountryRules::bundled().expect("bundled dataset");
        let nl = rules.get("NL").expect("NL rule");
        assert_eq!(render(nl, OutputFormat::Human).expect("render"), "NL\t18\tU04F10");
    }

    #[test]
    fn json_row_lists_fields() {
        let rules = CountryRules::bundled().expect("bundled dataset");
        let gb = rules.get("GB").expect("GB rule");
        let value: serde_json::Value =
            serde_json::from_str(&render(gb, OutputFormat::Json).expect("render")).expect("JSON");
        assert_eq!(value["country_code"], "GB");
        assert_eq!(value["total_length"], 22);
        assert_eq!(value["fields"], serde_json::json!(["U04", "F06", "F08"]));
    }
}

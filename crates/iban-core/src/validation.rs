//! IBAN validation pipeline.
//!
//! [`validate`] runs a fixed sequence of stages and reports the first one
//! that fails as a [`ValidationOutcome`]. Invalid input is an ordinary
//! outcome, never an error:
//!
//! 1. structure (ASCII alphanumerics only, at least 4 characters)
//! 2. country code known to the registry
//! 3. start bytes `[A-Z]{2}[0-9]{2}`
//! 4. non-empty BBAN
//! 5. BBAN segments match the country's field codes
//! 6. total length
//! 7. MOD 97-10 check digits
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::check_digits::{encode_letters_to_digits, mod97_10};
use crate::registry::{CountryRule, CountryRules};

/// Alphanumeric groups of at least four characters; also matches `""`.
static IBAN_STRUCTURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9]{4,})*$")
        .unwrap_or_else(|_| Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

/// Country code followed by two check digits.
static START_BYTES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}[0-9]{2}$")
        .unwrap_or_else(|_| Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

/// Result of [`validate`]. Exactly one is produced per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Every stage passed.
    ValidIban,
    /// Empty, shorter than 4 characters, or contains a non-alphanumeric
    /// character.
    InvalidStructure,
    /// The first two characters are not a country in the registry.
    InvalidCountryCode,
    /// The first four characters are not two uppercase letters and two digits.
    InvalidStartBytes,
    /// Nothing follows the first four characters.
    InvalidBankAccount,
    /// A BBAN segment does not match its field code.
    InvalidInnerStructure,
    /// The length differs from the country's IBAN length.
    InvalidLength,
    /// The check digits do not match the MOD 97-10 checksum.
    InvalidChecksum,
}

impl ValidationOutcome {
    /// Returns `true` only for [`ValidationOutcome::ValidIban`].
    pub fn is_valid(self) -> bool {
        self == Self::ValidIban
    }

    /// Stable `snake_case` name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidIban => "valid_iban",
            Self::InvalidStructure => "invalid_structure",
            Self::InvalidCountryCode => "invalid_country_code",
            Self::InvalidStartBytes => "invalid_start_bytes",
            Self::InvalidBankAccount => "invalid_bank_account",
            Self::InvalidInnerStructure => "invalid_inner_structure",
            Self::InvalidLength => "invalid_length",
            Self::InvalidChecksum => "invalid_checksum",
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates `iban` against `rules`.
///
/// The input must be in electronic form: no spaces or separators.
///
/// # Examples
///
/// ```
/// use iban_core::{CountryRules, ValidationOutcome, validate};
///
/// let rules = CountryRules::bundled().expect("bundled dataset");
/// assert_eq!(validate(&rules, "GB82WEST12345698765432"), ValidationOutcome::ValidIban);
/// assert_eq!(validate(&rules, "NL26"), ValidationOutcome::InvalidBankAccount);
/// ```
pub fn validate(rules: &CountryRules, iban: &str) -> ValidationOutcome {
    let outcome = run_stages(rules, iban);
    trace!(outcome = %outcome, length = iban.len(), "validated IBAN");
    outcome
}

fn run_stages(rules: &CountryRules, iban: &str) -> ValidationOutcome {
    if !IBAN_STRUCTURE_RE.is_match(iban) {
        return ValidationOutcome::InvalidStructure;
    }
    if iban.len() < 4 {
        return ValidationOutcome::InvalidStructure;
    }

    // Past the structure check the input is ASCII, so byte slicing is safe.
    let Ok(rule) = rules.get(&iban[..2]) else {
        return ValidationOutcome::InvalidCountryCode;
    };

    if !START_BYTES_RE.is_match(&iban[..4]) {
        return ValidationOutcome::InvalidStartBytes;
    }

    let bban = &iban[4..];
    if bban.is_empty() {
        return ValidationOutcome::InvalidBankAccount;
    }

    if !bban_matches(rule, bban) {
        return ValidationOutcome::InvalidInnerStructure;
    }

    if iban.len() != rule.total_length() {
        return ValidationOutcome::InvalidLength;
    }

    let Ok(expected) = iban[2..4].parse::<u32>() else {
        return ValidationOutcome::InvalidChecksum;
    };
    match checksum(iban) {
        Some(actual) if actual == expected => ValidationOutcome::ValidIban,
        Some(_) | None => ValidationOutcome::InvalidChecksum,
    }
}

/// Walks the country's fields over successive slices of `bban`.
///
/// Slice ends are clamped to the BBAN length, so a short BBAN hands its last
/// field a truncated slice, which then fails the exact-length check. A rule
/// whose structure did not parse matches nothing.
fn bban_matches(rule: &CountryRule, bban: &str) -> bool {
    if rule.structure_error().is_some() {
        return false;
    }
    let mut offset = 0;
    for field in rule.fields() {
        let end = (offset + field.length).min(bban.len());
        let Some(segment) = bban.get(offset..end) else {
            return false;
        };
        if !field.matches(segment) {
            return false;
        }
        offset += field.length;
    }
    true
}

/// Computes the MOD 97-10 check digits for `iban`.
///
/// The existing check digits (positions 3–4) are ignored: the body after the
/// first four characters is followed by the country code and `"00"`,
/// uppercased, letter-encoded and reduced modulo 97. The result is
/// `98 - remainder`, always in `2..=98`; format it with `{:02}`.
///
/// Returns `None` if `iban` is shorter than four characters or contains
/// anything other than ASCII letters and digits.
///
/// # Examples
///
/// ```
/// use iban_core::checksum;
///
/// assert_eq!(checksum("NL00ABNA0417164300"), Some(91));
/// assert_eq!(checksum("GB82WEST12345698765432"), Some(82));
/// ```
pub fn checksum(iban: &str) -> Option<u32> {
    let country = iban.get(..2)?;
    let body = iban.get(4..)?;

    let rotated = format!("{body}{country}00").to_ascii_uppercase();
    let digits = encode_letters_to_digits(&rotated)?;
    let remainder = mod97_10(digits.trim_start_matches('0'))?;
    Some(98 - remainder)
}

/// Loads `registry` asynchronously if needed, then validates `iban`.
///
/// # Errors
///
/// Only a [`crate::LoadError`] from loading the registry.
#[cfg(feature = "async")]
pub async fn validate_async(
    registry: &crate::Registry,
    iban: &str,
) -> Result<ValidationOutcome, crate::LoadError> {
    let rules = registry.load_async().await?;
    Ok(validate(rules, iban))
}

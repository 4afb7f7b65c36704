//! IBAN construction from an account number plus a BIC or country code.
//!
//! [`create`] keeps two kinds of failure apart:
//!
//! - `Ok("")` means there was nothing to build from: an empty account, a
//!   bank identifier that is not 8 or 11 characters, or no country at all.
//! - `Err(CreateError)` means the input named something that cannot work: a
//!   country without a rule, or characters no checksum can be computed over.
use crate::registry::{CountryNotFound, CountryRules, LoadError};
use crate::validation::checksum;

/// Valid lengths of a business identifier code (BIC).
const BIC_LENGTHS: [usize; 2] = [8, 11];

/// Reasons [`create`] refuses to build an IBAN.
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    /// The resolved country code has no rule in the registry.
    #[error(transparent)]
    CountryNotFound(#[from] CountryNotFound),

    /// The assembled IBAN contains characters outside ASCII letters and
    /// digits, so it has no checksum.
    #[error("cannot compute check digits for {iban:?}: only ASCII letters and digits are allowed")]
    Unencodable {
        /// The IBAN with `00` check digits that failed to encode.
        iban: String,
    },

    /// The registry could not be loaded (asynchronous entry point only).
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Builds an IBAN for `account`.
///
/// With a `bank_identifier` (BIC), the bank code is its first four
/// characters and the country is `country_code` if given, else the BIC's
/// characters 5–6. The account is left-padded with zeros so that bank code
/// plus account fill the country's BBAN; a longer account is kept as is.
///
/// Without a BIC, `country_code` alone is used and the account becomes the
/// whole BBAN, unpadded.
///
/// Empty strings for `bank_identifier` or `country_code` count as absent.
///
/// # Errors
///
/// [`CreateError::CountryNotFound`] if the resolved country has no rule, and
/// [`CreateError::Unencodable`] if the account or bank code contains
/// characters other than ASCII letters and digits.
///
/// # Examples
///
/// ```
/// use iban_core::{CountryRules, create};
///
/// let rules = CountryRules::bundled().expect("bundled dataset");
/// let iban = create(&rules, "417164300", Some("ABNANL2A"), None).expect("known country");
/// assert_eq!(iban, "NL91ABNA0417164300");
///
/// // Nothing to build from.
/// assert_eq!(create(&rules, "", None, None).expect("no error"), "");
/// ```
pub fn create(
    rules: &CountryRules,
    account: &str,
    bank_identifier: Option<&str>,
    country_code: Option<&str>,
) -> Result<String, CreateError> {
    if account.is_empty() {
        return Ok(String::new());
    }

    let bank_identifier = bank_identifier.filter(|bic| !bic.is_empty());
    let country_code = country_code.filter(|cc| !cc.is_empty());

    if let Some(bic) = bank_identifier {
        if !BIC_LENGTHS.contains(&bic.len()) {
            return Ok(String::new());
        }
        let (Some(bank_code), Some(bic_country)) = (bic.get(..4), bic.get(4..6)) else {
            return Ok(String::new());
        };

        let country = country_code.unwrap_or(bic_country);
        let rule = rules.get(country)?;

        let width = rule.total_length().saturating_sub(4 + bank_code.len());
        return assemble(country, &format!("{bank_code}{account:0>width$}"));
    }

    if let Some(country) = country_code {
        if !rules.contains(country) {
            return Err(CountryNotFound {
                code: country.to_owned(),
            }
            .into());
        }
        return assemble(country, account);
    }

    Ok(String::new())
}

/// Fills in the check digits for `country + "00" + bban`.
fn assemble(country: &str, bban: &str) -> Result<String, CreateError> {
    let provisional = format!("{country}00{bban}");
    let Some(check) = checksum(&provisional) else {
        return Err(CreateError::Unencodable { iban: provisional });
    };
    Ok(format!("{country}{check:02}{bban}"))
}

/// Loads `registry` asynchronously if needed, then runs [`create`].
///
/// # Errors
///
/// [`CreateError::Load`] if the registry cannot be loaded, otherwise as
/// [`create`].
#[cfg(feature = "async")]
pub async fn create_async(
    registry: &crate::Registry,
    account: &str,
    bank_identifier: Option<&str>,
    country_code: Option<&str>,
) -> Result<String, CreateError> {
    let rules = registry.load_async().await?;
    create(rules, account, bank_identifier, country_code)
}

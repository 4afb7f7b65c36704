//! Deterministic IBAN generation for benchmarking and property-based testing
//! of `iban-core`.
//!
//! Every generated IBAN is built from a country rule: each BBAN field is
//! filled with random characters of its class, then the check digits are
//! computed with [`iban_core::checksum`]. The same seed always yields the
//! same sequence.

use iban_core::{CharacterClass, CountryRule, CountryRules, checksum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Candidate characters for every class; each class draws from its subset.
const ASCII_ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Seeded source of valid IBANs for a set of country rules.
pub struct IbanGenerator<'a> {
    rules: &'a CountryRules,
    rng: StdRng,
}

impl<'a> IbanGenerator<'a> {
    /// Creates a generator over `rules` with a fixed `seed`.
    pub fn new(rules: &'a CountryRules, seed: u64) -> Self {
        Self {
            rules,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates one IBAN for `rule`.
    ///
    /// Returns `None` for a rule whose structure did not parse.
    pub fn iban_for(&mut self, rule: &CountryRule) -> Option<String> {
        if rule.structure_error().is_some() {
            return None;
        }
        let bban: String = rule
            .fields()
            .iter()
            .flat_map(|field| std::iter::repeat_n(field.class, field.length))
            .map(|class| random_char(&mut self.rng, class))
            .collect();

        let country = rule.country_code();
        let check = checksum(&format!("{country}00{bban}"))?;
        Some(format!("{country}{check:02}{bban}"))
    }

    /// Generates `count` IBANs, cycling through the countries in code order.
    pub fn batch(&mut self, count: usize) -> Vec<String> {
        let all: &'a CountryRules = self.rules;
        let rules: Vec<&'a CountryRule> = all.iter().collect();
        if rules.is_empty() {
            return Vec::new();
        }
        (0..count)
            .filter_map(|i| self.iban_for(rules[i % rules.len()]))
            .collect()
    }

    /// Generates a random decimal string of exactly `len` digits.
    pub fn digits(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| random_char(&mut self.rng, CharacterClass::Digits))
            .collect()
    }
}

/// Changes the check digits of `iban` so that it no longer validates.
///
/// Inputs shorter than four characters are returned unchanged.
pub fn corrupt_check_digits(iban: &str) -> String {
    let (Some(country), Some(check), Some(bban)) = (iban.get(..2), iban.get(2..4), iban.get(4..))
    else {
        return iban.to_owned();
    };
    let current: u32 = check.parse().unwrap_or(0);
    let wrong = if current == 98 { 2 } else { current + 1 };
    format!("{country}{wrong:02}{bban}")
}

fn random_char(rng: &mut StdRng, class: CharacterClass) -> char {
    let allowed: Vec<u8> = ASCII_ALPHANUMERIC
        .iter()
        .copied()
        .filter(|&b| class.allows(b))
        .collect();
    match allowed.get(rng.gen_range(0..allowed.len().max(1))) {
        Some(&b) => char::from(b),
        None => '0',
    }
}

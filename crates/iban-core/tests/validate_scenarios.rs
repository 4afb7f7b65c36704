//! End-to-end validation and construction through a loaded `Registry`.
#![allow(clippy::expect_used)]

use iban_core::{CreateError, Registry, ValidationOutcome, create, matches_format, validate};

fn outcome(iban: &str) -> ValidationOutcome {
    let registry = Registry::bundled();
    validate(registry.load().expect("bundled dataset"), iban)
}

#[test]
fn each_stage_reports_its_own_outcome() {
    let cases = [
        ("GB82WEST12345698765432", ValidationOutcome::ValidIban),
        ("NL20INGB0001234567", ValidationOutcome::ValidIban),
        ("", ValidationOutcome::InvalidStructure),
        ("NL20INGB00012345!7", ValidationOutcome::InvalidStructure),
        ("KR00BANK0123456789", ValidationOutcome::InvalidCountryCode),
        ("NLKR", ValidationOutcome::InvalidStartBytes),
        ("NL26", ValidationOutcome::InvalidBankAccount),
        ("NL20INGB000123456", ValidationOutcome::InvalidInnerStructure),
        ("NL20INGB00012345678", ValidationOutcome::InvalidLength),
        ("NL21INGB0001234567", ValidationOutcome::InvalidChecksum),
    ];
    for (iban, expected) in cases {
        assert_eq!(outcome(iban), expected, "{iban:?}");
    }
}

/// An unknown country wins over a malformed start, since lookup comes first.
#[test]
fn country_lookup_precedes_start_bytes() {
    assert_eq!(outcome("1234567890"), ValidationOutcome::InvalidCountryCode);
}

#[test]
fn created_ibans_round_trip_through_validate() {
    let registry = Registry::bundled();
    let rules = registry.load().expect("bundled dataset");

    for (account, bic) in [
        ("417164300", "ABNANL2A"),
        ("1234567", "INGBNL2A"),
        ("12345698765432", "WESTGB2L"),
        ("60161331926819", "NWBKGB2LXXX"),
    ] {
        let iban = create(rules, account, Some(bic), None).expect("known country");
        assert_eq!(validate(rules, &iban), ValidationOutcome::ValidIban, "{iban}");
    }
}

#[test]
fn create_distinguishes_empty_from_unknown_country() {
    let registry = Registry::bundled();
    let rules = registry.load().expect("bundled dataset");

    assert_eq!(create(rules, "", Some(""), None).expect("no error"), "");
    assert_eq!(create(rules, "417164300", Some(""), None).expect("no error"), "");
    assert!(matches!(
        create(rules, "417164300", None, Some("XX")),
        Err(CreateError::CountryNotFound(_))
    ));
}

#[test]
fn format_matcher_public_surface() {
    assert!(matches_format("0124556789ABCde", "A15"));
    assert!(!matches_format("0123456789", "X10"));
    assert!(!matches_format("123", "F05"));
}

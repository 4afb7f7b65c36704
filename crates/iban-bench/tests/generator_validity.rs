//! Generated IBANs must validate for every shipped country and any seed.
#![allow(clippy::expect_used)]

use iban_bench::{IbanGenerator, corrupt_check_digits};
use iban_core::{CountryRules, ValidationOutcome, validate};
use proptest::prelude::*;

fn bundled() -> CountryRules {
    CountryRules::bundled().expect("bundled dataset")
}

#[test]
fn every_country_generates_valid_ibans() {
    let rules = bundled();
    for seed in [42, 123, 999, 7777, 54321] {
        let mut generator = IbanGenerator::new(&rules, seed);
        for rule in rules.iter() {
            let iban = generator.iban_for(rule).expect("encodable");
            assert_eq!(
                validate(&rules, &iban),
                ValidationOutcome::ValidIban,
                "{}/seed={seed}: {iban}",
                rule.country_code()
            );
        }
    }
}

#[test]
fn corrupted_ibans_fail_on_checksum() {
    let rules = bundled();
    for iban in IbanGenerator::new(&rules, 42).batch(200) {
        let bad = corrupt_check_digits(&iban);
        assert_eq!(
            validate(&rules, &bad),
            ValidationOutcome::InvalidChecksum,
            "{iban} -> {bad}"
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_seed_yields_valid_batch(seed in any::<u64>()) {
        let rules = bundled();
        for iban in IbanGenerator::new(&rules, seed).batch(rules.len()) {
            prop_assert_eq!(validate(&rules, &iban), ValidationOutcome::ValidIban, "{}", iban);
        }
    }
}

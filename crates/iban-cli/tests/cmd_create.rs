//! Integration tests for `iban create`.
#![allow(clippy::expect_used)]

use std::process::{Command, Output};

fn iban(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_iban"))
        .args(args)
        .env_remove("IBAN_DATASET")
        .output()
        .expect("run iban")
}

#[test]
fn create_from_bic() {
    let out = iban(&["create", "417164300", "--bic", "ABNANL2A"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "NL91ABNA0417164300\n");
}

#[test]
fn create_from_eleven_character_bic() {
    let out = iban(&["create", "12345698765432", "--bic", "WESTGB2LXXX"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "GB82WEST12345698765432\n");
}

#[test]
fn create_from_country_only() {
    let out = iban(&["create", "INGB0001234567", "--country", "NL"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "NL20INGB0001234567\n");
}

#[test]
fn create_json() {
    let out = iban(&["create", "417164300", "--bic", "ABNANL2A", "-f", "json"]);
    assert_eq!(out.status.code(), Some(0));
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("JSON output");
    assert_eq!(value["iban"], "NL91ABNA0417164300");
}

#[test]
fn unknown_country_exits_1() {
    let out = iban(&["create", "417164300", "--bic", "BANKUS33"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("\"US\""));
}

#[test]
fn wrong_bic_length_exits_1() {
    let out = iban(&["create", "417164300", "--bic", "ABNANL2"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot construct"));
}

#[test]
fn missing_bic_and_country_is_a_usage_error() {
    let out = iban(&["create", "417164300"]);
    assert_eq!(out.status.code(), Some(2));
}

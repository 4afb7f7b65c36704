//! Full `validate` pipeline over generated IBANs, plus `create`.
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use iban_bench::{IbanGenerator, corrupt_check_digits};
use iban_core::{CountryRules, create, validate};

fn bench_validation(c: &mut Criterion) {
    let rules = CountryRules::bundled().expect("bundled dataset");
    let mut group = c.benchmark_group("validate");

    for count in [100, 1_000, 10_000] {
        let valid = IbanGenerator::new(&rules, 42).batch(count);
        let invalid: Vec<String> = valid.iter().map(|i| corrupt_check_digits(i)).collect();

        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("valid", count), &valid, |b, ibans| {
            b.iter(|| ibans.iter().filter(|i| validate(&rules, i).is_valid()).count());
        });

        group.bench_with_input(BenchmarkId::new("bad_checksum", count), &invalid, |b, ibans| {
            b.iter(|| ibans.iter().filter(|i| validate(&rules, i).is_valid()).count());
        });
    }
    group.finish();
}

fn bench_create(c: &mut Criterion) {
    let rules = CountryRules::bundled().expect("bundled dataset");
    let mut group = c.benchmark_group("create");

    for (name, account, bic) in [
        ("nl_bic8", "417164300", "ABNANL2A"),
        ("gb_bic11", "12345698765432", "WESTGB2LXXX"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| create(&rules, account, Some(bic), None));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validation, bench_create);
criterion_main!(benches);

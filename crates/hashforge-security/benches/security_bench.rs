// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for normalisation, digest derivation, and per-row
// verification in the hashforge-security crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use hashforge_core::config::DigestParams;
use hashforge_core::types::PersonalRecordInput;
use hashforge_security::{DigestEngine, normalize};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn sample_input() -> PersonalRecordInput {
    PersonalRecordInput::new("  jane ", Some("q"), "PUBLIC", "1/1/2000", "1 main street, apt 4")
}

fn bench_normalize(c: &mut Criterion) {
    let input = sample_input();
    c.bench_function("normalize", |b| {
        b.iter(|| {
            let record = normalize(black_box(&input)).expect("normalize failed");
            black_box(record);
        });
    });
}

/// Derivation cost at the test parameters and at the production defaults.
///
/// The production figure is the per-row cost of a duplicate scan, so it
/// bounds registration latency for a table of a given size.
fn bench_derive(c: &mut Criterion) {
    let key = normalize(&sample_input()).expect("normalize failed").key().clone();

    let mut group = c.benchmark_group("argon2id_derive");
    group.sample_size(10);
    for (label, params) in [
        ("test params", DigestParams::for_tests()),
        ("default params", DigestParams::default()),
    ] {
        let engine = DigestEngine::new(&params).expect("engine");
        let salt = engine.new_salt().expect("salt");
        group.bench_function(label, |b| {
            b.iter(|| {
                let digest = engine
                    .derive(black_box(&key), black_box(&salt))
                    .expect("derive failed");
                black_box(digest);
            });
        });
    }
    group.finish();
}

/// One probe of a duplicate scan: a stored row the key does not match.
fn bench_verify_miss(c: &mut Criterion) {
    let engine = DigestEngine::new(&DigestParams::for_tests()).expect("engine");
    let key = normalize(&sample_input()).expect("normalize failed").key().clone();
    let other = PersonalRecordInput::new("John", None, "Smith", "07-04-1990", "12 Elm St");
    let other_key = normalize(&other).expect("normalize failed").key().clone();
    let salt = engine.new_salt().expect("salt");
    let stored = engine.derive(&other_key, &salt).expect("derive failed");

    c.bench_function("verify miss (test params)", |b| {
        b.iter(|| {
            let matched = engine
                .verify(black_box(&key), black_box(&salt), black_box(&stored))
                .expect("verify failed");
            black_box(matched);
        });
    });
}

criterion_group!(benches, bench_normalize, bench_derive, bench_verify_miss);
criterion_main!(benches);

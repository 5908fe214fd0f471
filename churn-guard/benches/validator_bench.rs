//! Validator throughput benchmarks.

use churn_guard::config::ValidatorConfig;
use churn_guard::core::ChurnValidator;
use churn_guard::test_fixtures::{consistency_batch, records_to_batch, ChurnRecord};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::hint::black_box;

fn raw_export(rows: usize) -> arrow::record_batch::RecordBatch {
    let records: Vec<ChurnRecord> = (0..rows)
        .map(|i| {
            let record = ChurnRecord::new(format!("C{i:07}"), (i % 72) as i64, 70.0, 1400.0);
            if i % 50 == 0 {
                record.with_total_charges(Some(" "))
            } else {
                record
            }
        })
        .collect();
    records_to_batch(&records).unwrap()
}

fn bench_validate(c: &mut Criterion) {
    let validator = ChurnValidator::new(ValidatorConfig::strict()).unwrap();
    let mut group = c.benchmark_group("validate");

    for rows in [1_000, 10_000, 100_000] {
        let raw = raw_export(rows);
        group.bench_with_input(BenchmarkId::new("raw_export", rows), &raw, |b, raw| {
            b.iter_batched(
                || raw.clone(),
                |mut batch| black_box(validator.validate_batch(&mut batch)),
                BatchSize::LargeInput,
            )
        });

        let mut coerced = consistency_batch(rows, rows / 100).unwrap();
        validator.validate_batch(&mut coerced);
        group.bench_with_input(BenchmarkId::new("coerced", rows), &coerced, |b, coerced| {
            b.iter_batched(
                || coerced.clone(),
                |mut batch| black_box(validator.validate_batch(&mut batch)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_strict_validator", |b| {
        b.iter(|| ChurnValidator::new(black_box(ValidatorConfig::strict())).unwrap())
    });
}

criterion_group!(benches, bench_validate, bench_build);
criterion_main!(benches);

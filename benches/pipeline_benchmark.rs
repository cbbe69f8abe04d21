//! Benchmark for fitting and applying the segmentation pipeline
//!
//! Run with: cargo bench --bench pipeline_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use cardseg::pipeline::{CentroidModel, Feature, SegmentationPipeline, TOTAL_SPENDING};

/// Synthetic customers with roughly `missing_rate` of each feature missing
fn generate_customers(n_rows: usize, missing_rate: f64, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut columns: Vec<Column> = Vec::with_capacity(Feature::ALL.len());

    for feature in Feature::ALL {
        let values: Vec<Option<f64>> = (0..n_rows)
            .map(|_| {
                if rng.gen::<f64>() < missing_rate {
                    return None;
                }
                let value = match feature {
                    Feature::BalanceFrequency
                    | Feature::PurchasesFrequency
                    | Feature::OneoffPurchasesFrequency
                    | Feature::PurchasesInstallmentsFrequency
                    | Feature::CashAdvanceFrequency
                    | Feature::PrcFullPayment => (rng.gen::<f64>() * 12.0).round() / 12.0,
                    Feature::CashAdvanceTrx | Feature::PurchasesTrx => rng.gen_range(0..40) as f64,
                    Feature::Tenure => rng.gen_range(6..=12) as f64,
                    Feature::Payments => {
                        if rng.gen::<f64>() < 0.05 {
                            0.0
                        } else {
                            rng.gen::<f64>() * 5000.0
                        }
                    }
                    _ => {
                        // Skewed amounts, like real balances and purchases
                        let v = rng.gen::<f64>();
                        (v * v * v) * 10_000.0
                    }
                };
                Some(value)
            })
            .collect();
        columns.push(Column::new(feature.name().into(), values));
    }

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

fn benchmark_model() -> CentroidModel {
    CentroidModel::new(
        vec![
            Feature::Purchases.name().to_string(),
            Feature::CashAdvance.name().to_string(),
            TOTAL_SPENDING.to_string(),
        ],
        None,
        vec![
            vec![0.0, 0.0, 0.0],
            vec![3000.0, 0.0, 3000.0],
            vec![0.0, 3000.0, 3000.0],
            vec![3000.0, 3000.0, 6000.0],
        ],
    )
    .expect("Failed to create model")
}

/// Benchmark fitting on reference datasets of increasing size
fn benchmark_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_by_rows");
    group.sample_size(20);

    for n_rows in [1_000, 10_000, 100_000] {
        let df = generate_customers(n_rows, 0.05, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &df, |b, df| {
            b.iter(|| {
                let mut pipeline = SegmentationPipeline::new(benchmark_model());
                let _ = pipeline.fit(black_box(df));
            });
        });
    }

    group.finish();
}

/// Benchmark batch prediction against a pipeline fitted once
fn benchmark_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict_by_rows");
    group.sample_size(20);

    let mut pipeline = SegmentationPipeline::new(benchmark_model());
    pipeline
        .fit(&generate_customers(10_000, 0.05, 7))
        .expect("Failed to fit pipeline");

    for n_rows in [1_000, 10_000, 100_000] {
        let df = generate_customers(n_rows, 0.05, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &df, |b, df| {
            b.iter(|| {
                let _ = pipeline.predict(black_box(df));
            });
        });
    }

    group.finish();
}

/// Benchmark how the missing rate affects prediction
fn benchmark_missing_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict_by_missing_rate");
    group.sample_size(20);

    let mut pipeline = SegmentationPipeline::new(benchmark_model());
    pipeline
        .fit(&generate_customers(10_000, 0.05, 7))
        .expect("Failed to fit pipeline");

    for rate in [0.0, 0.1, 0.5] {
        let df = generate_customers(50_000, rate, 42);

        group.bench_with_input(BenchmarkId::from_parameter(rate), &df, |b, df| {
            b.iter(|| {
                let _ = pipeline.predict(black_box(df));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_fit,
    benchmark_predict,
    benchmark_missing_rate
);
criterion_main!(benches);

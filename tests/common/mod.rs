//! Shared test utilities and fixture generators

#![allow(dead_code)]

use cardseg::pipeline::*;
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Reference dataset with a known set of learned statistics.
///
/// Learned values:
/// - CREDIT_LIMIT median: 2500 (over 1000, 2000, 3000, 4000)
/// - MINIMUM_PAYMENTS median where PAYMENTS != 0: 25 (row 1 paid 0; row 2
///   has missing PAYMENTS and still counts)
/// - BALANCE 300, PURCHASES 75, ONEOFF 20, INSTALLMENTS 40, CASH_ADVANCE 125,
///   PAYMENTS 75 (medians)
/// - BALANCE_FREQUENCY 0.5 (tie with 1.0, smallest wins), PURCHASES_TRX 0
///   (all distinct), TENURE 12 (modes)
/// - `CUST_ID`: extra column that must pass through untouched
pub fn create_reference_dataframe() -> DataFrame {
    df! {
        "CUST_ID" => ["C1", "C2", "C3", "C4", "C5"],
        "BALANCE" => [Some(100.0f64), Some(200.0), None, Some(400.0), Some(500.0)],
        "BALANCE_FREQUENCY" => [Some(1.0f64), Some(1.0), Some(0.5), None, Some(0.5)],
        "PURCHASES" => [Some(100.0f64), Some(0.0), Some(50.0), None, Some(300.0)],
        "ONEOFF_PURCHASES" => [Some(30.0f64), Some(0.0), Some(50.0), Some(10.0), None],
        "INSTALLMENTS_PURCHASES" => [Some(80.0f64), Some(0.0), Some(0.0), None, Some(100.0)],
        "CASH_ADVANCE" => [Some(0.0f64), Some(500.0), None, Some(0.0), Some(250.0)],
        "PURCHASES_FREQUENCY" => [Some(1.0f64), Some(0.0), Some(0.5), Some(0.0), None],
        "ONEOFF_PURCHASES_FREQUENCY" => [Some(0.25f64), Some(0.0), Some(0.0), None, Some(0.5)],
        "PURCHASES_INSTALLMENTS_FREQUENCY" => [0.75f64, 0.0, 0.0, 0.0, 1.0],
        "CASH_ADVANCE_FREQUENCY" => [Some(0.0f64), Some(0.5), None, Some(0.0), Some(0.25)],
        "CASH_ADVANCE_TRX" => [Some(0i64), Some(4), None, Some(0), Some(2)],
        "PURCHASES_TRX" => [Some(10i64), Some(0), Some(3), None, Some(12)],
        "CREDIT_LIMIT" => [Some(1000.0f64), None, Some(3000.0), Some(2000.0), Some(4000.0)],
        "PAYMENTS" => [Some(50.0f64), Some(0.0), None, Some(200.0), Some(100.0)],
        "MINIMUM_PAYMENTS" => [Some(25.0f64), None, Some(40.0), Some(10.0), None],
        "PRC_FULL_PAYMENT" => [Some(0.0f64), Some(0.0), Some(1.0), None, Some(0.5)],
        "TENURE" => [Some(12i64), Some(12), Some(6), None, Some(12)],
    }
    .unwrap()
}

/// Records of the reference dataset.
pub fn reference_records() -> Vec<Record> {
    records_from_frame(&create_reference_dataframe()).unwrap()
}

/// A customer with every feature except MINIMUM_PAYMENTS present.
///
/// PURCHASES (100) disagrees with ONEOFF + INSTALLMENTS (30 + 80).
pub fn sample_customer() -> Record {
    Record::new()
        .with(Feature::Balance, 1500.0)
        .with(Feature::BalanceFrequency, 0.9)
        .with(Feature::Purchases, 100.0)
        .with(Feature::OneoffPurchases, 30.0)
        .with(Feature::InstallmentsPurchases, 80.0)
        .with(Feature::CashAdvance, 20.0)
        .with(Feature::PurchasesFrequency, 0.5)
        .with(Feature::OneoffPurchasesFrequency, 0.3)
        .with(Feature::PurchasesInstallmentsFrequency, 0.4)
        .with(Feature::CashAdvanceFrequency, 0.1)
        .with(Feature::CashAdvanceTrx, 1.0)
        .with(Feature::PurchasesTrx, 5.0)
        .with(Feature::CreditLimit, 2000.0)
        .with(Feature::Payments, 50.0)
        .with(Feature::PrcFullPayment, 0.0)
        .with(Feature::Tenure, 12.0)
}

/// Four-cluster model over purchases, cash advance and total spending.
///
/// - 0: low spenders
/// - 1: purchase heavy
/// - 2: cash heavy
/// - 3: heavy on both
pub fn create_test_model() -> CentroidModel {
    CentroidModel::new(
        vec![
            "PURCHASES".to_string(),
            "CASH_ADVANCE".to_string(),
            TOTAL_SPENDING.to_string(),
        ],
        None,
        vec![
            vec![0.0, 0.0, 0.0],
            vec![500.0, 0.0, 500.0],
            vec![0.0, 500.0, 500.0],
            vec![500.0, 500.0, 1000.0],
        ],
    )
    .unwrap()
}

/// JSON form of `create_test_model`.
pub fn test_model_json() -> String {
    serde_json::to_string_pretty(&create_test_model()).unwrap()
}

/// Pipeline fitted on the reference dataset.
pub fn create_fitted_pipeline() -> SegmentationPipeline {
    let mut pipeline = SegmentationPipeline::new(create_test_model());
    pipeline.fit(&create_reference_dataframe()).unwrap();
    pipeline
}

/// Imputer fitted on the reference records.
pub fn create_fitted_imputer() -> Imputer {
    let mut imputer = Imputer::new();
    imputer.fit(&reference_records()).unwrap();
    imputer
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("customers.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("customers.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that no feature of a record is missing
pub fn assert_no_missing(record: &Record) {
    for feature in Feature::ALL {
        assert!(
            !record.is_missing(feature),
            "{} is still missing after imputation: {:?}",
            feature,
            record
        );
    }
}

/// Float column values of a DataFrame
pub fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

//! Command-line argument definitions using clap

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::pipeline::{Feature, Record};

/// cardseg - Assign credit card customers to behavioral segments
#[derive(Parser, Debug)]
#[command(name = "cardseg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the preprocessing pipeline on a reference dataset and bundle it
    /// with a trained centroid model
    Fit {
        /// Reference dataset (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Trained centroid model (JSON with features, optional scaler, centroids)
        #[arg(short, long)]
        model: PathBuf,

        /// Artifact output path.
        /// Defaults to input directory with '_pipeline.json' suffix (e.g., train.csv → train_pipeline.json).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of rows to use for schema inference (CSV only).
        /// Use 0 for full table scan.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Assign a cluster to every row of a dataset
    Predict {
        /// Fitted pipeline artifact produced by `cardseg fit`
        #[arg(short, long)]
        artifact: PathBuf,

        /// Customers to segment (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Results path (CSV or Parquet, determined by extension).
        /// Defaults to input directory with '_clusters' suffix (e.g., customers.csv → customers_clusters.csv).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the preprocessed features (imputed columns and TOTAL_SPENDING)
        /// instead of the raw input columns alongside CLUSTER
        #[arg(long, default_value = "false")]
        emit_features: bool,

        /// Number of rows to use for schema inference (CSV only).
        /// Use 0 for full table scan.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Assign a cluster to a single customer given on the command line.
    /// Omitted features are treated as missing and imputed.
    Single {
        /// Fitted pipeline artifact produced by `cardseg fit`
        #[arg(short, long)]
        artifact: PathBuf,

        #[command(flatten)]
        entry: SingleEntryArgs,
    },

    /// Show the cluster descriptions and recommendations
    Clusters,
}

/// One customer's features as command-line flags
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct SingleEntryArgs {
    /// Balance
    #[arg(long, value_parser = validate_amount)]
    pub balance: Option<f64>,

    /// Balance frequency (0 to 1)
    #[arg(long, value_parser = validate_ratio)]
    pub balance_frequency: Option<f64>,

    /// Total purchases
    #[arg(long, value_parser = validate_amount)]
    pub purchases: Option<f64>,

    /// One-off purchases
    #[arg(long, value_parser = validate_amount)]
    pub oneoff_purchases: Option<f64>,

    /// Installment purchases
    #[arg(long, value_parser = validate_amount)]
    pub installments_purchases: Option<f64>,

    /// Cash advance
    #[arg(long, value_parser = validate_amount)]
    pub cash_advance: Option<f64>,

    /// Purchases frequency (0 to 1)
    #[arg(long, value_parser = validate_ratio)]
    pub purchases_frequency: Option<f64>,

    /// One-off purchase frequency (0 to 1)
    #[arg(long, value_parser = validate_ratio)]
    pub oneoff_purchases_frequency: Option<f64>,

    /// Installment purchase frequency (0 to 1)
    #[arg(long, value_parser = validate_ratio)]
    pub purchases_installments_frequency: Option<f64>,

    /// Cash advance frequency (0 to 1)
    #[arg(long, value_parser = validate_ratio)]
    pub cash_advance_frequency: Option<f64>,

    /// Cash advance transactions
    #[arg(long, value_parser = validate_count)]
    pub cash_advance_trx: Option<f64>,

    /// Purchase transactions
    #[arg(long, value_parser = validate_count)]
    pub purchases_trx: Option<f64>,

    /// Credit limit
    #[arg(long, value_parser = validate_amount)]
    pub credit_limit: Option<f64>,

    /// Payments
    #[arg(long, value_parser = validate_amount)]
    pub payments: Option<f64>,

    /// Minimum payments
    #[arg(long, value_parser = validate_amount)]
    pub minimum_payments: Option<f64>,

    /// Percent of full payment (0 to 1)
    #[arg(long, value_parser = validate_ratio)]
    pub prc_full_payment: Option<f64>,

    /// Tenure in months
    #[arg(long, value_parser = validate_count)]
    pub tenure: Option<f64>,
}

impl SingleEntryArgs {
    /// Values in canonical feature order.
    pub fn values(&self) -> [Option<f64>; 17] {
        [
            self.balance,
            self.balance_frequency,
            self.purchases,
            self.oneoff_purchases,
            self.installments_purchases,
            self.cash_advance,
            self.purchases_frequency,
            self.oneoff_purchases_frequency,
            self.purchases_installments_frequency,
            self.cash_advance_frequency,
            self.cash_advance_trx,
            self.purchases_trx,
            self.credit_limit,
            self.payments,
            self.minimum_payments,
            self.prc_full_payment,
            self.tenure,
        ]
    }

    pub fn to_record(&self) -> Record {
        Record::from_values(self.values())
    }

    /// Features left unset on the command line.
    pub fn missing_features(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .zip(self.values())
            .filter(|(_, v)| v.is_none())
            .map(|(f, _)| f)
            .collect()
    }
}

/// `<dir>/<stem>_pipeline.json` next to the reference dataset.
pub fn default_artifact_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    parent.join(format!("{}_pipeline.json", stem))
}

/// `<dir>/<stem>_clusters.<ext>` next to the input, keeping its format.
pub fn default_results_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv");
    parent.join(format!("{}_clusters.{}", stem, extension))
}

fn parse_number(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", s));
    }
    Ok(value)
}

/// Validator for currency amounts
fn validate_amount(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if value < 0.0 {
        Err(format!("amount must be non-negative, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for frequency and percentage ratios
fn validate_ratio(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if !(0.0..=1.0).contains(&value) {
        Err(format!("ratio must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for transaction counts and tenure
fn validate_count(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if value < 0.0 || value.fract() != 0.0 {
        Err(format!("count must be a non-negative whole number, got {}", value))
    } else {
        Ok(value)
    }
}

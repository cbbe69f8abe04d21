//! Error types for the segmentation pipeline.
//!
//! Every failure in the core surfaces as a `PipelineError`. Nothing is
//! masked or defaulted here: a schema problem left unreported would silently
//! shift cluster assignments, so callers always see the first error.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while fitting, transforming, predicting or (de)serialising.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input column is absent from the dataset.
    #[error("Required column '{column}' not found in dataset")]
    Schema { column: String },

    /// `fit` was called on a dataset with zero rows.
    #[error("Cannot fit on an empty dataset: medians and modes are undefined")]
    EmptyDataset,

    /// A statistic had no non-missing values to learn from.
    #[error("Column '{column}' has no non-missing values to learn a statistic from")]
    NoObservations { column: String },

    /// `transform` or `predict` was called before `fit`.
    #[error("Pipeline has not been fitted; call fit before transform or predict")]
    NotFitted,

    /// A required column holds non-numeric data.
    #[error("Column '{column}' must be numeric, found dtype {dtype}")]
    Type { column: String, dtype: String },

    /// The clustering model is malformed.
    #[error("Invalid cluster model: {0}")]
    Model(String),

    /// A feature vector does not match the model's dimensionality.
    #[error("Feature vector has {actual} values but the model expects {expected}")]
    FeatureCount { expected: usize, actual: usize },

    /// The artifact was written by an incompatible format version.
    #[error("Unsupported artifact format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The artifact parsed but its contents are inconsistent.
    #[error("Invalid pipeline artifact: {0}")]
    Artifact(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the pipeline module.
pub type PipelineResult<T> = Result<T, PipelineError>;

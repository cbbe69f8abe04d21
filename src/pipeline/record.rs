//! Per-customer records and conversion to and from polars DataFrames

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};
use super::schema::{Feature, FEATURE_COUNT, TOTAL_SPENDING};

/// One customer's feature vector.
///
/// Missing values are `None`. NaN is normalised to `None` on the way in, so
/// downstream stages only ever test for `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Record {
    values: [Option<f64>; FEATURE_COUNT],
    total_spending: Option<f64>,
}

impl Record {
    /// A record with every feature missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from values in canonical feature order.
    pub fn from_values(values: [Option<f64>; FEATURE_COUNT]) -> Self {
        let mut record = Self::new();
        for (feature, value) in Feature::ALL.into_iter().zip(values) {
            record.set(feature, value);
        }
        record
    }

    /// Builder-style setter for a present value.
    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        self.set(feature, Some(value));
        self
    }

    /// Builder-style setter that marks a feature missing.
    pub fn without(mut self, feature: Feature) -> Self {
        self.set(feature, None);
        self
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.values[feature.index()]
    }

    pub fn set(&mut self, feature: Feature, value: Option<f64>) {
        self.values[feature.index()] = value.filter(|v| !v.is_nan());
    }

    pub fn is_missing(&self, feature: Feature) -> bool {
        self.get(feature).is_none()
    }

    /// Values in canonical feature order.
    pub fn values(&self) -> &[Option<f64>; FEATURE_COUNT] {
        &self.values
    }

    /// Derived TOTAL_SPENDING, present once the aggregation stage has run.
    pub fn total_spending(&self) -> Option<f64> {
        self.total_spending
    }

    pub fn set_total_spending(&mut self, value: Option<f64>) {
        self.total_spending = value.filter(|v| !v.is_nan());
    }

    /// Look up a value by column name, including the derived column.
    pub fn value_by_name(&self, name: &str) -> Option<f64> {
        if name == TOTAL_SPENDING {
            return self.total_spending;
        }
        Feature::from_name(name).and_then(|f| self.get(f))
    }
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Null
    )
}

/// Fetch a required feature column as Float64.
///
/// A column that is entirely null is accepted whatever dtype the reader
/// inferred for it (an all-empty CSV column comes back as a string column).
fn feature_column(df: &DataFrame, feature: Feature) -> PipelineResult<Float64Chunked> {
    let name = feature.name();
    let column = df.column(name).map_err(|_| PipelineError::Schema {
        column: name.to_string(),
    })?;

    if !is_numeric_dtype(column.dtype()) && column.null_count() != column.len() {
        return Err(PipelineError::Type {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }

    let float_col = column.cast(&DataType::Float64)?;
    Ok(float_col.f64()?.clone())
}

/// Check that every required feature column is present and numeric.
pub fn validate_schema(df: &DataFrame) -> PipelineResult<()> {
    for feature in Feature::ALL {
        feature_column(df, feature)?;
    }
    Ok(())
}

/// Extract one record per row, in row order.
pub fn records_from_frame(df: &DataFrame) -> PipelineResult<Vec<Record>> {
    let mut records = vec![Record::new(); df.height()];

    for feature in Feature::ALL {
        let ca = feature_column(df, feature)?;
        for (record, value) in records.iter_mut().zip(ca.iter()) {
            record.set(feature, value);
        }
    }

    Ok(records)
}

/// Write transformed records back over the feature columns of `df`.
///
/// Feature columns are replaced in place (becoming Float64), TOTAL_SPENDING is
/// added or replaced, and every other column is kept untouched.
pub fn frame_with_records(df: &DataFrame, records: &[Record]) -> PipelineResult<DataFrame> {
    if records.len() != df.height() {
        return Err(PipelineError::Polars(PolarsError::ShapeMismatch(
            format!(
                "{} records cannot be written to a frame of {} rows",
                records.len(),
                df.height()
            )
            .into(),
        )));
    }

    let mut out = df.clone();
    for feature in Feature::ALL {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.get(feature)).collect();
        out.with_column(Series::new(feature.name().into(), values))?;
    }

    let totals: Vec<Option<f64>> = records.iter().map(|r| r.total_spending()).collect();
    out.with_column(Series::new(TOTAL_SPENDING.into(), totals))?;

    Ok(out)
}

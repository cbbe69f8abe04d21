//! Missing value imputation with statistics learned at fit time
//!
//! Four rules, each targeting its own set of columns:
//! - CREDIT_LIMIT takes the fit-time median.
//! - MINIMUM_PAYMENTS becomes 0 for customers who paid nothing, otherwise the
//!   median among customers whose PAYMENTS were not zero.
//! - Frequency and count columns take their fit-time mode.
//! - Remaining monetary columns take their fit-time median.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use super::record::Record;
use super::schema::Feature;
use super::stage::Transformer;
use super::stats::{median, mode};

/// Statistics learned from a reference dataset. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedStatistics {
    pub credit_limit_median: f64,
    pub min_payments_median: f64,
    pub modes: BTreeMap<Feature, f64>,
    pub medians: BTreeMap<Feature, f64>,
}

/// Non-missing values of one feature.
fn observed(records: &[Record], feature: Feature) -> Vec<f64> {
    records.iter().filter_map(|r| r.get(feature)).collect()
}

fn learn_statistic(
    values: &[f64],
    column: Feature,
    statistic: fn(&[f64]) -> Option<f64>,
) -> PipelineResult<f64> {
    statistic(values).ok_or_else(|| PipelineError::NoObservations {
        column: column.name().to_string(),
    })
}

impl FittedStatistics {
    /// Learn every statistic from `records`.
    pub fn learn(records: &[Record]) -> PipelineResult<Self> {
        if records.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        let credit_limit_median = learn_statistic(
            &observed(records, Feature::CreditLimit),
            Feature::CreditLimit,
            median,
        )?;

        // A missing PAYMENTS is not zero, so those rows stay in
        let paying: Vec<f64> = records
            .iter()
            .filter(|r| r.get(Feature::Payments) != Some(0.0))
            .filter_map(|r| r.get(Feature::MinimumPayments))
            .collect();
        let min_payments_median = learn_statistic(&paying, Feature::MinimumPayments, median)?;

        let mut modes = BTreeMap::new();
        for feature in Feature::MODE_IMPUTED {
            let value = learn_statistic(&observed(records, feature), feature, mode)?;
            modes.insert(feature, value);
        }

        let mut medians = BTreeMap::new();
        for feature in Feature::MEDIAN_IMPUTED {
            let value = learn_statistic(&observed(records, feature), feature, median)?;
            medians.insert(feature, value);
        }

        Ok(Self {
            credit_limit_median,
            min_payments_median,
            modes,
            medians,
        })
    }

    /// Check that statistics read from outside cover every imputed column
    /// with a finite value.
    pub fn validate(&self) -> PipelineResult<()> {
        let finite = |name: &str, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(PipelineError::Artifact(format!(
                    "statistic for {} is not finite",
                    name
                )))
            }
        };

        finite(Feature::CreditLimit.name(), self.credit_limit_median)?;
        finite(Feature::MinimumPayments.name(), self.min_payments_median)?;

        for (group, expected) in [
            (&self.modes, &Feature::MODE_IMPUTED[..]),
            (&self.medians, &Feature::MEDIAN_IMPUTED[..]),
        ] {
            for feature in expected {
                let value = group.get(feature).ok_or_else(|| {
                    PipelineError::Artifact(format!("no statistic stored for {}", feature))
                })?;
                finite(feature.name(), *value)?;
            }
        }

        Ok(())
    }
}

/// Fills missing values. Must be fitted before it can transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Imputer {
    statistics: Option<FittedStatistics>,
}

impl Imputer {
    pub fn new() -> Self {
        Self::default()
    }

    /// An imputer that reuses previously learned statistics.
    pub fn from_statistics(statistics: FittedStatistics) -> Self {
        Self {
            statistics: Some(statistics),
        }
    }

    pub fn statistics(&self) -> Option<&FittedStatistics> {
        self.statistics.as_ref()
    }
}

impl Transformer for Imputer {
    fn name(&self) -> &'static str {
        "imputer"
    }

    fn fit(&mut self, records: &[Record]) -> PipelineResult<()> {
        self.statistics = Some(FittedStatistics::learn(records)?);
        Ok(())
    }

    fn transform(&self, record: Record) -> PipelineResult<Record> {
        let stats = self.statistics.as_ref().ok_or(PipelineError::NotFitted)?;
        let mut out = record;

        if out.is_missing(Feature::CreditLimit) {
            out.set(Feature::CreditLimit, Some(stats.credit_limit_median));
        }

        // Reads PAYMENTS from the input, before PAYMENTS itself is imputed
        if out.is_missing(Feature::MinimumPayments) {
            let fill = if record.get(Feature::Payments) == Some(0.0) {
                0.0
            } else {
                stats.min_payments_median
            };
            out.set(Feature::MinimumPayments, Some(fill));
        }

        for (&feature, &value) in stats.modes.iter().chain(stats.medians.iter()) {
            if out.is_missing(feature) {
                out.set(feature, Some(value));
            }
        }

        Ok(out)
    }

    fn is_fitted(&self) -> bool {
        self.statistics.is_some()
    }
}

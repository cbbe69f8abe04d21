//! The transformer abstraction shared by all preprocessing stages

use serde::{Deserialize, Serialize};

use super::aggregate::MonetaryAggregator;
use super::error::PipelineResult;
use super::imputer::Imputer;
use super::record::Record;
use super::reconcile::PurchaseReconciler;

/// A preprocessing step with an optional learning phase.
///
/// `transform` must be a pure function of the record and whatever `fit`
/// learned; it never mutates the transformer.
pub trait Transformer {
    /// Short identifier used in artifacts and messages.
    fn name(&self) -> &'static str;

    /// Learn state from a reference dataset. Stateless stages keep the default.
    fn fit(&mut self, _records: &[Record]) -> PipelineResult<()> {
        Ok(())
    }

    fn transform(&self, record: Record) -> PipelineResult<Record>;

    fn is_fitted(&self) -> bool {
        true
    }
}

/// A concrete pipeline stage. The order of a `Vec<Stage>` is the order of
/// application and is persisted with the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    Imputer(Imputer),
    PurchaseReconciler(PurchaseReconciler),
    MonetaryAggregator(MonetaryAggregator),
}

impl Stage {
    /// Imputer, then reconciliation, then aggregation.
    pub fn default_sequence() -> Vec<Stage> {
        vec![
            Stage::Imputer(Imputer::new()),
            Stage::PurchaseReconciler(PurchaseReconciler::default()),
            Stage::MonetaryAggregator(MonetaryAggregator::new()),
        ]
    }

    fn inner(&self) -> &dyn Transformer {
        match self {
            Stage::Imputer(s) => s,
            Stage::PurchaseReconciler(s) => s,
            Stage::MonetaryAggregator(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Transformer {
        match self {
            Stage::Imputer(s) => s,
            Stage::PurchaseReconciler(s) => s,
            Stage::MonetaryAggregator(s) => s,
        }
    }
}

impl Transformer for Stage {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn fit(&mut self, records: &[Record]) -> PipelineResult<()> {
        self.inner_mut().fit(records)
    }

    fn transform(&self, record: Record) -> PipelineResult<Record> {
        self.inner().transform(record)
    }

    fn is_fitted(&self) -> bool {
        self.inner().is_fitted()
    }
}

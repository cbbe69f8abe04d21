//! TOTAL_SPENDING derivation

use serde::{Deserialize, Serialize};

use super::error::PipelineResult;
use super::record::Record;
use super::schema::Feature;
use super::stage::Transformer;

/// Adds TOTAL_SPENDING = PURCHASES + CASH_ADVANCE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonetaryAggregator {}

impl MonetaryAggregator {
    pub fn new() -> Self {
        Self {}
    }
}

impl Transformer for MonetaryAggregator {
    fn name(&self) -> &'static str {
        "monetary_aggregator"
    }

    fn transform(&self, record: Record) -> PipelineResult<Record> {
        let total = match (
            record.get(Feature::Purchases),
            record.get(Feature::CashAdvance),
        ) {
            (Some(purchases), Some(cash)) => Some(purchases + cash),
            _ => None,
        };

        let mut out = record;
        out.set_total_spending(total);
        Ok(out)
    }
}

//! PURCHASES reconciliation against its one-off and installment components

use serde::{Deserialize, Serialize};

use super::error::PipelineResult;
use super::record::Record;
use super::schema::Feature;
use super::stage::Transformer;

pub const DEFAULT_RTOL: f64 = 1e-5;
pub const DEFAULT_ATOL: f64 = 1e-8;

/// `|a - b| <= atol + rtol * |b|`. Missing values are never close, and an
/// infinite value is only close to itself.
pub fn is_close(a: Option<f64>, b: Option<f64>, rtol: f64, atol: f64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) if a.is_infinite() || b.is_infinite() => a == b,
        (Some(a), Some(b)) => (a - b).abs() <= atol + rtol * b.abs(),
        _ => false,
    }
}

/// Overwrites PURCHASES with ONEOFF_PURCHASES + INSTALLMENTS_PURCHASES when
/// the two disagree beyond the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReconciler {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for PurchaseReconciler {
    fn default() -> Self {
        Self {
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
        }
    }
}

impl Transformer for PurchaseReconciler {
    fn name(&self) -> &'static str {
        "purchase_reconciler"
    }

    fn transform(&self, record: Record) -> PipelineResult<Record> {
        let expected = match (
            record.get(Feature::OneoffPurchases),
            record.get(Feature::InstallmentsPurchases),
        ) {
            (Some(oneoff), Some(installments)) => Some(oneoff + installments),
            _ => None,
        };

        let mut out = record;
        if !is_close(record.get(Feature::Purchases), expected, self.rtol, self.atol) {
            out.set(Feature::Purchases, expected);
        }
        Ok(out)
    }
}

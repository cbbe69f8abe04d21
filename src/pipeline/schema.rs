//! Input schema: the 17 credit card usage features and their imputation groups

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the column added by the monetary aggregation stage.
pub const TOTAL_SPENDING: &str = "TOTAL_SPENDING";

/// Name of the column appended to batch prediction output.
pub const CLUSTER_COLUMN: &str = "CLUSTER";

/// Number of input features every record carries.
pub const FEATURE_COUNT: usize = 17;

/// One of the 17 input features.
///
/// Variants are declared in the canonical feature order, so `Feature::ALL`
/// and `feature as usize` agree with the order of an input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    Balance,
    BalanceFrequency,
    Purchases,
    OneoffPurchases,
    InstallmentsPurchases,
    CashAdvance,
    PurchasesFrequency,
    OneoffPurchasesFrequency,
    PurchasesInstallmentsFrequency,
    CashAdvanceFrequency,
    CashAdvanceTrx,
    PurchasesTrx,
    CreditLimit,
    Payments,
    MinimumPayments,
    PrcFullPayment,
    Tenure,
}

impl Feature {
    /// All features in canonical input order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Balance,
        Feature::BalanceFrequency,
        Feature::Purchases,
        Feature::OneoffPurchases,
        Feature::InstallmentsPurchases,
        Feature::CashAdvance,
        Feature::PurchasesFrequency,
        Feature::OneoffPurchasesFrequency,
        Feature::PurchasesInstallmentsFrequency,
        Feature::CashAdvanceFrequency,
        Feature::CashAdvanceTrx,
        Feature::PurchasesTrx,
        Feature::CreditLimit,
        Feature::Payments,
        Feature::MinimumPayments,
        Feature::PrcFullPayment,
        Feature::Tenure,
    ];

    /// Bounded or count-like columns imputed with their most frequent value.
    pub const MODE_IMPUTED: [Feature; 9] = [
        Feature::BalanceFrequency,
        Feature::PurchasesFrequency,
        Feature::OneoffPurchasesFrequency,
        Feature::PurchasesInstallmentsFrequency,
        Feature::CashAdvanceFrequency,
        Feature::CashAdvanceTrx,
        Feature::PurchasesTrx,
        Feature::Tenure,
        Feature::PrcFullPayment,
    ];

    /// Skewed monetary columns imputed with their median.
    pub const MEDIAN_IMPUTED: [Feature; 6] = [
        Feature::Balance,
        Feature::Purchases,
        Feature::OneoffPurchases,
        Feature::InstallmentsPurchases,
        Feature::CashAdvance,
        Feature::Payments,
    ];

    /// Column name as it appears in input files.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Balance => "BALANCE",
            Feature::BalanceFrequency => "BALANCE_FREQUENCY",
            Feature::Purchases => "PURCHASES",
            Feature::OneoffPurchases => "ONEOFF_PURCHASES",
            Feature::InstallmentsPurchases => "INSTALLMENTS_PURCHASES",
            Feature::CashAdvance => "CASH_ADVANCE",
            Feature::PurchasesFrequency => "PURCHASES_FREQUENCY",
            Feature::OneoffPurchasesFrequency => "ONEOFF_PURCHASES_FREQUENCY",
            Feature::PurchasesInstallmentsFrequency => "PURCHASES_INSTALLMENTS_FREQUENCY",
            Feature::CashAdvanceFrequency => "CASH_ADVANCE_FREQUENCY",
            Feature::CashAdvanceTrx => "CASH_ADVANCE_TRX",
            Feature::PurchasesTrx => "PURCHASES_TRX",
            Feature::CreditLimit => "CREDIT_LIMIT",
            Feature::Payments => "PAYMENTS",
            Feature::MinimumPayments => "MINIMUM_PAYMENTS",
            Feature::PrcFullPayment => "PRC_FULL_PAYMENT",
            Feature::Tenure => "TENURE",
        }
    }

    /// Look up a feature by its column name.
    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Position of this feature within a record.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

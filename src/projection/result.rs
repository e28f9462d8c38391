//! Aggregate result structures for a retirement calculation

use serde::{Deserialize, Serialize};

use super::contributions::PeriodOutcome;

/// Round a monetary amount to the nearest whole currency unit.
/// Applied per field once all compounding completes, never mid-calculation.
pub(crate) fn round_whole(amount: f64) -> f64 {
    amount.round()
}

/// Projected value and monthly retirement income for one asset class
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AssetSlice {
    /// Projected balance at retirement
    pub value: f64,

    /// Monthly income before tax
    pub monthly_income_gross: f64,

    /// Monthly income after tax
    pub monthly_income_net: f64,
}

impl AssetSlice {
    pub(crate) fn rounded(self) -> Self {
        Self {
            value: round_whole(self.value),
            monthly_income_gross: round_whole(self.monthly_income_gross),
            monthly_income_net: round_whole(self.monthly_income_net),
        }
    }
}

/// Complete projection result
///
/// Monetary fields are rounded to whole currency units independently as a
/// display step. The `periods` rows keep full precision for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementResult {
    pub pension: AssetSlice,
    pub training_fund: AssetSlice,
    pub personal_portfolio: AssetSlice,
    pub crypto: AssetSlice,
    pub real_estate: AssetSlice,

    /// Sum of all projected asset values at retirement
    pub total_savings: f64,

    /// Combined after-tax monthly income across all assets
    pub total_net_monthly_income: f64,

    /// Current monthly expenses carried forward at the assumed inflation rate
    pub future_monthly_expenses: f64,

    /// Income target: future expenses scaled by the replacement percentage
    pub target_monthly_income: f64,

    /// Whether projected net income meets the target
    pub achieves_target: bool,

    /// Signed difference between net income and the target
    pub target_gap: f64,

    /// Effective pension tax rate blended across work periods
    pub blended_pension_tax_rate: f64,

    /// Per-period projection rows, in chronological order
    pub periods: Vec<PeriodOutcome>,
}

//! Plan input structures treated as read-only value objects by the engine

use serde::{Deserialize, Serialize};

use crate::returns::RiskTolerance;

/// A contiguous age range during which one country's contribution, fee, and
/// return rules apply
///
/// A sequence of periods represents a career timeline. Later periods compound
/// on top of the running balance left by earlier ones, so the projector
/// processes them in ascending `start_age` order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkPeriod {
    /// Country code, e.g. "israel", "usa", "uk"
    pub country: String,

    /// Age at which the period begins
    pub start_age: u32,

    /// Age at which the period ends
    pub end_age: u32,

    /// Monthly pension contribution during the period
    pub monthly_contribution: f64,

    /// Monthly training-fund contribution during the period
    pub monthly_training_contribution: f64,

    /// Assumed annual pension return (%) for the period
    pub pension_annual_return: f64,

    /// Fee charged on each deposit (%), applied before compounding
    pub deposit_fee_pct: f64,

    /// Annual management fee (%), netted from the return
    pub annual_fee_pct: f64,
}

impl WorkPeriod {
    /// Years of this period that overlap the plan window. Non-overlapping
    /// periods contribute nothing.
    pub fn overlap_years(&self, current_age: u32, retirement_age: u32) -> u32 {
        let start = self.start_age.max(current_age);
        let end = self.end_age.min(retirement_age);
        end.saturating_sub(start)
    }
}

/// Full set of saver inputs for one calculation call
///
/// Constructed once per call and never mutated by the engine. Rates and fees
/// are percentages (8.0 means 8%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInputs {
    pub current_age: u32,
    pub retirement_age: u32,

    /// Current monthly expenses in the base currency
    pub monthly_expenses: f64,

    /// Assumed annual inflation rate (%)
    pub inflation_rate: f64,

    /// Desired income replacement at retirement (% of future expenses)
    pub target_replacement_pct: f64,

    /// Risk tolerance tier; None leaves returns unadjusted
    pub risk_tolerance: Option<RiskTolerance>,

    // Opening balances per asset class
    pub pension_balance: f64,
    pub training_fund_balance: f64,
    pub portfolio_balance: f64,
    pub crypto_balance: f64,
    pub real_estate_balance: f64,

    /// Monthly training-fund contribution; None falls back to the latest
    /// overlapping work period's training contribution
    pub training_fund_monthly_contribution: Option<f64>,
    pub portfolio_monthly_contribution: f64,
    pub crypto_monthly_contribution: f64,

    // Assumed annual returns (%) per asset class
    pub training_fund_annual_return: f64,
    pub portfolio_annual_return: f64,
    pub crypto_annual_return: f64,
    pub real_estate_annual_return: f64,

    /// Annual training-fund management fee (%), netted from its return
    pub training_fund_management_fee: f64,

    /// Annual rental yield (%) earned by the real-estate holding
    pub rental_yield_pct: f64,
}

impl PlanInputs {
    /// Years between now and retirement; None when the plan window is empty
    /// or inverted
    pub fn years_to_retirement(&self) -> Option<u32> {
        self.retirement_age
            .checked_sub(self.current_age)
            .filter(|years| *years > 0)
    }
}

impl Default for PlanInputs {
    fn default() -> Self {
        Self {
            current_age: 30,
            retirement_age: 67,
            monthly_expenses: 0.0,
            inflation_rate: 3.0,
            target_replacement_pct: 100.0,
            risk_tolerance: Some(RiskTolerance::Moderate),
            pension_balance: 0.0,
            training_fund_balance: 0.0,
            portfolio_balance: 0.0,
            crypto_balance: 0.0,
            real_estate_balance: 0.0,
            training_fund_monthly_contribution: None,
            portfolio_monthly_contribution: 0.0,
            crypto_monthly_contribution: 0.0,
            training_fund_annual_return: 7.0,
            portfolio_annual_return: 8.0,
            crypto_annual_return: 15.0,
            real_estate_annual_return: 4.0,
            training_fund_management_fee: 0.6,
            rental_yield_pct: 3.0,
        }
    }
}

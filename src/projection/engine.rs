//! Core retirement calculation: allocation-weighted returns, per-period
//! pension compounding, multi-asset aggregation, and tax application

use crate::error::Result;
use crate::inputs::{PlanInputs, WorkPeriod};
use crate::returns::{weighted_return, AllocationEntry, HistoricalReturnsTable};
use crate::tax::{blended_pension_rate, TaxProfiles};

use super::assets::{
    monthly_rental_income, monthly_withdrawal, project_asset, CRYPTO_TAX_RATE, PORTFOLIO_TAX_RATE,
    REAL_ESTATE_TAX_RATE, STANDARD_WITHDRAWAL_RATE, TRAINING_FUND_WITHDRAWAL_RATE,
};
use super::contributions::project_periods;
use super::result::{round_whole, AssetSlice, RetirementResult};

/// Retirement projection engine
///
/// Owns the historical-return table and the country tax profiles; one engine
/// serves any number of calculation calls. All math is pure and synchronous —
/// identical inputs produce bit-identical results.
pub struct RetirementEngine {
    table: HistoricalReturnsTable,
    profiles: TaxProfiles,
}

impl RetirementEngine {
    /// Create an engine with the given return table and tax profiles
    pub fn new(table: HistoricalReturnsTable, profiles: TaxProfiles) -> Self {
        Self { table, profiles }
    }

    /// Run a full projection.
    ///
    /// Returns `Ok(None)` when the plan window is empty or inverted
    /// (`retirement_age <= current_age`) — an invalid plan is a sentinel, not
    /// an error. Hard errors are reserved for tax-profile lookups that cannot
    /// produce a number.
    pub fn calculate(
        &self,
        inputs: &PlanInputs,
        periods: &[WorkPeriod],
        pension_allocation: &[AllocationEntry],
        training_fund_allocation: &[AllocationEntry],
    ) -> Result<Option<RetirementResult>> {
        let Some(years) = inputs.years_to_retirement() else {
            return Ok(None);
        };
        let horizon = years as f64;
        let tier = inputs.risk_tolerance;

        // Pension: allocation-weighted return when available, else each
        // period's own assumption; compounded period by period.
        let pension_base =
            positive_or_none(weighted_return(pension_allocation, horizon, &self.table));
        let pension_projection = project_periods(
            inputs.pension_balance,
            inputs.current_age,
            inputs.retirement_age,
            periods,
            pension_base,
            tier,
        );
        let pension_value = pension_projection.closing_balance;

        // Training fund: one blended rate over the whole horizon, net of its
        // management fee.
        let training_return = positive_or_none(weighted_return(
            training_fund_allocation,
            horizon,
            &self.table,
        ))
        .unwrap_or(inputs.training_fund_annual_return);
        let training_contribution = inputs
            .training_fund_monthly_contribution
            .unwrap_or_else(|| latest_training_contribution(periods, inputs));
        let training_fund_value = project_asset(
            inputs.training_fund_balance,
            training_contribution,
            training_return,
            inputs.training_fund_management_fee,
            years,
            tier,
        );

        let portfolio_value = project_asset(
            inputs.portfolio_balance,
            inputs.portfolio_monthly_contribution,
            inputs.portfolio_annual_return,
            0.0,
            years,
            tier,
        );
        let crypto_value = project_asset(
            inputs.crypto_balance,
            inputs.crypto_monthly_contribution,
            inputs.crypto_annual_return,
            0.0,
            years,
            tier,
        );
        let real_estate_value = project_asset(
            inputs.real_estate_balance,
            0.0,
            inputs.real_estate_annual_return,
            0.0,
            years,
            tier,
        );

        // Pension and training-fund income share the career-blended rate;
        // the other assets use flat per-asset rates.
        let blended_rate = blended_pension_rate(&pension_projection.outcomes, &self.profiles)?;

        let pension = income_slice(
            pension_value,
            monthly_withdrawal(pension_value, STANDARD_WITHDRAWAL_RATE),
            blended_rate,
        );
        let training_fund = income_slice(
            training_fund_value,
            monthly_withdrawal(training_fund_value, TRAINING_FUND_WITHDRAWAL_RATE),
            blended_rate,
        );
        let personal_portfolio = income_slice(
            portfolio_value,
            monthly_withdrawal(portfolio_value, STANDARD_WITHDRAWAL_RATE),
            PORTFOLIO_TAX_RATE,
        );
        let crypto = income_slice(
            crypto_value,
            monthly_withdrawal(crypto_value, STANDARD_WITHDRAWAL_RATE),
            CRYPTO_TAX_RATE,
        );
        let real_estate = income_slice(
            real_estate_value,
            monthly_withdrawal(real_estate_value, STANDARD_WITHDRAWAL_RATE)
                + monthly_rental_income(real_estate_value, inputs.rental_yield_pct),
            REAL_ESTATE_TAX_RATE,
        );

        let total_savings = pension_value
            + training_fund_value
            + portfolio_value
            + crypto_value
            + real_estate_value;
        let total_net_monthly_income = pension.monthly_income_net
            + training_fund.monthly_income_net
            + personal_portfolio.monthly_income_net
            + crypto.monthly_income_net
            + real_estate.monthly_income_net;

        let future_monthly_expenses =
            inputs.monthly_expenses * (1.0 + inputs.inflation_rate / 100.0).powi(years as i32);
        let target_monthly_income = future_monthly_expenses * inputs.target_replacement_pct / 100.0;

        let achieves_target = total_net_monthly_income >= target_monthly_income;
        let target_gap = total_net_monthly_income - target_monthly_income;

        // Rounding to whole currency units happens here, per field, after all
        // compounding is done.
        Ok(Some(RetirementResult {
            pension: pension.rounded(),
            training_fund: training_fund.rounded(),
            personal_portfolio: personal_portfolio.rounded(),
            crypto: crypto.rounded(),
            real_estate: real_estate.rounded(),
            total_savings: round_whole(total_savings),
            total_net_monthly_income: round_whole(total_net_monthly_income),
            future_monthly_expenses: round_whole(future_monthly_expenses),
            target_monthly_income: round_whole(target_monthly_income),
            achieves_target,
            target_gap: round_whole(target_gap),
            blended_pension_tax_rate: blended_rate,
            periods: pension_projection.outcomes,
        }))
    }
}

fn positive_or_none(rate: f64) -> Option<f64> {
    if rate > 0.0 {
        Some(rate)
    } else {
        None
    }
}

fn income_slice(value: f64, gross_monthly: f64, tax_rate: f64) -> AssetSlice {
    AssetSlice {
        value,
        monthly_income_gross: gross_monthly,
        monthly_income_net: gross_monthly * (1.0 - tax_rate),
    }
}

/// Training-fund contribution implied by the career timeline: the latest
/// period still inside the plan window
fn latest_training_contribution(periods: &[WorkPeriod], inputs: &PlanInputs) -> f64 {
    periods
        .iter()
        .filter(|p| p.overlap_years(inputs.current_age, inputs.retirement_age) > 0)
        .max_by_key(|p| p.start_age)
        .map(|p| p.monthly_training_contribution)
        .unwrap_or(0.0)
}

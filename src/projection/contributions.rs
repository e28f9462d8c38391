//! Work-period contribution projection with carry-forward balances

use serde::{Deserialize, Serialize};

use crate::inputs::WorkPeriod;
use crate::returns::{risk_adjusted_return, RiskTolerance};

/// Growth of an opening balance plus an end-of-month contribution stream
/// over a number of months
#[derive(Debug, Clone, Copy)]
pub(crate) struct GrowthComponents {
    pub opening_growth: f64,
    pub contribution_growth: f64,
}

/// Compound an opening balance and an ordinary annuity of monthly
/// contributions at a monthly rate.
///
/// At a zero monthly rate the annuity closed form divides by zero; the
/// contribution stream degrades to the exact linear sum instead.
pub(crate) fn compound_with_contributions(
    opening_balance: f64,
    net_monthly_contribution: f64,
    monthly_rate: f64,
    months: u32,
) -> GrowthComponents {
    let factor = (1.0 + monthly_rate).powi(months as i32);

    let contribution_growth = if monthly_rate.abs() < 1e-10 {
        net_monthly_contribution * months as f64
    } else {
        net_monthly_contribution * (factor - 1.0) / monthly_rate
    };

    GrowthComponents {
        opening_growth: opening_balance * factor,
        contribution_growth,
    }
}

/// Outcome of one work period within the plan window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodOutcome {
    pub country: String,
    pub start_age: u32,
    pub end_age: u32,

    /// Years of the period that fall inside the plan window
    pub period_years: u32,

    /// Balance carried into the period
    pub opening_balance: f64,

    /// Monthly contribution net of the deposit fee
    pub net_monthly_contribution: f64,

    /// Opening balance compounded to period end
    pub opening_growth: f64,

    /// Future value of the contribution stream at period end
    pub contribution_growth: f64,

    /// Balance carried out of the period
    pub closing_balance: f64,
}

impl PeriodOutcome {
    /// Balance increase over the period, used to weight the blended pension
    /// tax rate
    pub fn growth(&self) -> f64 {
        self.closing_balance - self.opening_balance
    }
}

/// Result of projecting a full career timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodProjection {
    pub outcomes: Vec<PeriodOutcome>,
    pub closing_balance: f64,
}

/// Project an opening balance through a sequence of work periods.
///
/// Periods are sorted by `start_age` before projecting so each closing
/// balance carries into the chronologically next period. Periods that do not
/// overlap the plan window contribute nothing. `base_return_override`, when
/// present, replaces each period's own pension return assumption (used when
/// an allocation-weighted return is available).
pub fn project_periods(
    opening_balance: f64,
    current_age: u32,
    retirement_age: u32,
    periods: &[WorkPeriod],
    base_return_override: Option<f64>,
    tier: Option<RiskTolerance>,
) -> PeriodProjection {
    let mut ordered: Vec<&WorkPeriod> = periods.iter().collect();
    ordered.sort_by_key(|p| p.start_age);

    let mut balance = opening_balance;
    let mut outcomes = Vec::with_capacity(ordered.len());

    for period in ordered {
        let period_years = period.overlap_years(current_age, retirement_age);
        if period_years == 0 {
            continue;
        }

        let base_return = base_return_override.unwrap_or(period.pension_annual_return);
        let adjusted_return = risk_adjusted_return(base_return, tier);
        let monthly_rate = (adjusted_return - period.annual_fee_pct) / 100.0 / 12.0;
        let months = period_years * 12;

        let net_monthly_contribution =
            period.monthly_contribution * (1.0 - period.deposit_fee_pct / 100.0);

        let growth =
            compound_with_contributions(balance, net_monthly_contribution, monthly_rate, months);
        let closing_balance = growth.opening_growth + growth.contribution_growth;

        outcomes.push(PeriodOutcome {
            country: period.country.clone(),
            start_age: period.start_age,
            end_age: period.end_age,
            period_years,
            opening_balance: balance,
            net_monthly_contribution,
            opening_growth: growth.opening_growth,
            contribution_growth: growth.contribution_growth,
            closing_balance,
        });

        balance = closing_balance;
    }

    PeriodProjection {
        outcomes,
        closing_balance: balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn period(country: &str, start_age: u32, end_age: u32, annual_return: f64) -> WorkPeriod {
        WorkPeriod {
            country: country.to_string(),
            start_age,
            end_age,
            monthly_contribution: 1_000.0,
            monthly_training_contribution: 0.0,
            pension_annual_return: annual_return,
            deposit_fee_pct: 0.0,
            annual_fee_pct: 0.0,
        }
    }

    #[test]
    fn test_zero_rate_is_exactly_linear() {
        let periods = vec![period("israel", 30, 40, 0.0)];
        let projection = project_periods(0.0, 30, 67, &periods, None, None);

        // 10 years at 0% return: contributions accumulate with no growth
        assert_eq!(projection.closing_balance, 1_000.0 * 120.0);
    }

    #[test]
    fn test_opening_balance_compounds() {
        let periods = vec![WorkPeriod {
            monthly_contribution: 0.0,
            ..period("israel", 30, 31, 12.0)
        }];
        let projection = project_periods(10_000.0, 30, 67, &periods, None, None);

        // 12% annual is 1% monthly over 12 months
        let expected = 10_000.0 * 1.01_f64.powi(12);
        assert_relative_eq!(projection.closing_balance, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_periods_carry_forward_in_age_order() {
        // Deliberately out of order; the second chronological period starts
        // from the first one's closing balance.
        let periods = vec![period("usa", 40, 50, 0.0), period("israel", 30, 40, 0.0)];
        let projection = project_periods(5_000.0, 30, 67, &periods, None, None);

        assert_eq!(projection.outcomes.len(), 2);
        assert_eq!(projection.outcomes[0].country, "israel");
        assert_eq!(projection.outcomes[1].country, "usa");
        assert!(
            (projection.outcomes[1].opening_balance - projection.outcomes[0].closing_balance)
                .abs()
                < 1e-10
        );
        assert_eq!(projection.closing_balance, 5_000.0 + 1_000.0 * 240.0);
    }

    #[test]
    fn test_period_outside_window_contributes_nothing() {
        let periods = vec![period("israel", 20, 30, 7.0)];
        let projection = project_periods(1_000.0, 35, 67, &periods, None, None);

        assert!(projection.outcomes.is_empty());
        assert_eq!(projection.closing_balance, 1_000.0);
    }

    #[test]
    fn test_deposit_fee_reduces_contribution_before_compounding() {
        let periods = vec![WorkPeriod {
            deposit_fee_pct: 2.0,
            ..period("israel", 30, 31, 0.0)
        }];
        let projection = project_periods(0.0, 30, 67, &periods, None, None);

        assert!((projection.closing_balance - 1_000.0 * 0.98 * 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_return_override_replaces_period_return() {
        let periods = vec![period("israel", 30, 40, 2.0)];
        let with_override = project_periods(0.0, 30, 67, &periods, Some(8.0), None);
        let without = project_periods(0.0, 30, 67, &periods, None, None);

        assert!(with_override.closing_balance > without.closing_balance);
    }
}

//! Single-rate projections and withdrawal income for the non-pension asset
//! classes

use crate::returns::{risk_adjusted_return, RiskTolerance};

use super::contributions::compound_with_contributions;

/// Assumed sustainable annual withdrawal rate for pension, personal
/// portfolio, crypto, and real estate
pub const STANDARD_WITHDRAWAL_RATE: f64 = 0.04;

/// Training funds draw at a higher assumed rate
pub const TRAINING_FUND_WITHDRAWAL_RATE: f64 = 0.05;

/// Flat tax on personal-portfolio withdrawal income (capital gains)
pub const PORTFOLIO_TAX_RATE: f64 = 0.25;

/// Flat tax on crypto withdrawal income
pub const CRYPTO_TAX_RATE: f64 = 0.25;

/// Flat tax on real-estate income
pub const REAL_ESTATE_TAX_RATE: f64 = 0.10;

/// Project an asset over the whole plan horizon at a single blended,
/// risk-adjusted annual return, net of a flat annual fee.
pub fn project_asset(
    opening_balance: f64,
    monthly_contribution: f64,
    annual_return_pct: f64,
    annual_fee_pct: f64,
    years: u32,
    tier: Option<RiskTolerance>,
) -> f64 {
    let adjusted_return = risk_adjusted_return(annual_return_pct, tier);
    let monthly_rate = (adjusted_return - annual_fee_pct) / 100.0 / 12.0;

    let growth =
        compound_with_contributions(opening_balance, monthly_contribution, monthly_rate, years * 12);
    growth.opening_growth + growth.contribution_growth
}

/// Monthly withdrawal income from a projected balance at a fixed annual
/// withdrawal rate
pub fn monthly_withdrawal(balance: f64, annual_withdrawal_rate: f64) -> f64 {
    balance * annual_withdrawal_rate / 12.0
}

/// Monthly rental income stream earned by a real-estate balance,
/// independent of its withdrawal income
pub fn monthly_rental_income(balance: f64, rental_yield_pct: f64) -> f64 {
    balance * rental_yield_pct / 100.0 / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_contribution_zero_return_holds_balance() {
        let value = project_asset(50_000.0, 0.0, 0.0, 0.0, 20, None);
        assert_eq!(value, 50_000.0);
    }

    #[test]
    fn test_fee_nets_against_return() {
        let gross = project_asset(100_000.0, 0.0, 7.0, 0.0, 10, None);
        let net = project_asset(100_000.0, 0.0, 7.0, 0.6, 10, None);
        assert!(net < gross);

        // Netting the fee is equivalent to a lower return
        let equivalent = project_asset(100_000.0, 0.0, 6.4, 0.0, 10, None);
        assert_relative_eq!(net, equivalent, max_relative = 1e-12);
    }

    #[test]
    fn test_withdrawal_rates() {
        assert!((monthly_withdrawal(600_000.0, STANDARD_WITHDRAWAL_RATE) - 2_000.0).abs() < 1e-10);
        assert!(
            (monthly_withdrawal(600_000.0, TRAINING_FUND_WITHDRAWAL_RATE) - 2_500.0).abs() < 1e-10
        );
    }

    #[test]
    fn test_rental_income() {
        assert!((monthly_rental_income(1_200_000.0, 3.0) - 3_000.0).abs() < 1e-10);
    }
}

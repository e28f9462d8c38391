//! Blended pension tax rate across multi-country careers

use log::debug;

use crate::error::{Error, Result};
use crate::projection::PeriodOutcome;

use super::profiles::TaxProfiles;

/// Blend each period's country pension-tax rate, weighted by the period's
/// balance growth.
///
/// Growth-weighting (rather than closing-balance weighting) means a period
/// that grew the pot more pulls the effective rate harder toward its
/// country's rate. When total growth across all periods is zero, the rate of
/// the first period's country applies; with no periods at all the rate is 0.
/// An unknown country in a period is an internal lookup failure, not a
/// caller input error.
pub fn blended_pension_rate(outcomes: &[PeriodOutcome], profiles: &TaxProfiles) -> Result<f64> {
    let Some(first) = outcomes.first() else {
        return Ok(0.0);
    };

    let mut weighted_rate = 0.0;
    let mut total_growth = 0.0;

    for outcome in outcomes {
        let profile = profiles.get(&outcome.country).ok_or_else(|| {
            Error::Calculation(format!(
                "no tax profile for country: {}",
                outcome.country
            ))
        })?;

        let growth = outcome.growth();
        weighted_rate += profile.pension_tax_rate * growth;
        total_growth += growth;
    }

    if total_growth <= 0.0 {
        let profile = profiles.get(&first.country).ok_or_else(|| {
            Error::Calculation(format!("no tax profile for country: {}", first.country))
        })?;
        debug!(
            "zero pension growth across {} periods; falling back to {} rate",
            outcomes.len(),
            profile.code
        );
        return Ok(profile.pension_tax_rate);
    }

    Ok(weighted_rate / total_growth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(country: &str, opening: f64, closing: f64) -> PeriodOutcome {
        PeriodOutcome {
            country: country.to_string(),
            start_age: 30,
            end_age: 40,
            period_years: 10,
            opening_balance: opening,
            net_monthly_contribution: 0.0,
            opening_growth: closing,
            contribution_growth: 0.0,
            closing_balance: closing,
        }
    }

    #[test]
    fn test_equal_growth_blends_to_mean() {
        let profiles = TaxProfiles::bundled();
        let outcomes = vec![
            outcome("israel", 0.0, 100_000.0),
            outcome("usa", 100_000.0, 200_000.0),
        ];

        let rate = blended_pension_rate(&outcomes, &profiles).unwrap();
        assert!((rate - (0.15 + 0.25) / 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_growth_weighting_dominates() {
        let profiles = TaxProfiles::bundled();
        // Israel period grew 3x as much as the US period
        let outcomes = vec![
            outcome("israel", 0.0, 300_000.0),
            outcome("usa", 300_000.0, 400_000.0),
        ];

        let rate = blended_pension_rate(&outcomes, &profiles).unwrap();
        let expected = (0.15 * 300_000.0 + 0.25 * 100_000.0) / 400_000.0;
        assert!((rate - expected).abs() < 1e-10);
    }

    #[test]
    fn test_zero_growth_falls_back_to_first_country() {
        let profiles = TaxProfiles::bundled();
        let outcomes = vec![outcome("uk", 50_000.0, 50_000.0)];

        let rate = blended_pension_rate(&outcomes, &profiles).unwrap();
        assert!((rate - 0.20).abs() < 1e-10);
    }

    #[test]
    fn test_no_periods_is_zero_rate() {
        let profiles = TaxProfiles::bundled();
        assert_eq!(blended_pension_rate(&[], &profiles).unwrap(), 0.0);
    }

    #[test]
    fn test_unknown_country_is_calculation_error() {
        let profiles = TaxProfiles::bundled();
        let outcomes = vec![outcome("atlantis", 0.0, 100_000.0)];

        assert!(matches!(
            blended_pension_rate(&outcomes, &profiles),
            Err(Error::Calculation(_))
        ));
    }
}

//! Progressive income-tax bracket evaluation

use serde::{Deserialize, Serialize};

/// One progressive tax bracket over [min, max) annual income.
/// The top bracket uses `f64::INFINITY` as its max.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: f64,
    pub max: f64,
    pub rate: f64,
}

impl TaxBracket {
    pub fn new(min: f64, max: f64, rate: f64) -> Self {
        Self { min, max, rate }
    }

    /// Width of the bracket's income band
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Tax attributed to a single bracket during a walk
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaxBracketDetail {
    pub bracket_min: f64,
    pub bracket_max: f64,
    pub rate: f64,
    pub taxable_amount: f64,
    pub tax: f64,
}

/// Result of walking an income through a progressive bracket table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketWalk {
    pub total_tax: f64,

    /// Rate of the last bracket actually touched
    pub marginal_rate: f64,

    pub details: Vec<TaxBracketDetail>,
}

/// Walk an annual income through ascending brackets.
///
/// Each bracket taxes `min(remaining, width) * rate`; the walk stops once the
/// remaining income is exhausted, so income exactly at a boundary is taxed
/// once, in the lower bracket.
pub fn income_tax(annual_income: f64, brackets: &[TaxBracket]) -> BracketWalk {
    let mut remaining = annual_income.max(0.0);
    let mut total_tax = 0.0;
    let mut marginal_rate = 0.0;
    let mut details = Vec::new();

    for bracket in brackets {
        if remaining <= 0.0 {
            break;
        }

        let taxable = remaining.min(bracket.width());
        let tax = taxable * bracket.rate;

        total_tax += tax;
        marginal_rate = bracket.rate;
        remaining -= taxable;

        details.push(TaxBracketDetail {
            bracket_min: bracket.min,
            bracket_max: bracket.max,
            rate: bracket.rate,
            taxable_amount: taxable,
            tax,
        });
    }

    BracketWalk {
        total_tax,
        marginal_rate,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_brackets() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(0.0, 100.0, 0.10),
            TaxBracket::new(100.0, f64::INFINITY, 0.20),
        ]
    }

    #[test]
    fn test_income_within_first_bracket() {
        let walk = income_tax(50.0, &two_brackets());
        assert!((walk.total_tax - 5.0).abs() < 1e-10);
        assert!((walk.marginal_rate - 0.10).abs() < 1e-10);
        assert_eq!(walk.details.len(), 1);
    }

    #[test]
    fn test_boundary_income_taxed_once_in_lower_bracket() {
        let walk = income_tax(100.0, &two_brackets());
        assert!((walk.total_tax - 10.0).abs() < 1e-10);
        assert!((walk.marginal_rate - 0.10).abs() < 1e-10);
        assert_eq!(walk.details.len(), 1);
    }

    #[test]
    fn test_income_spanning_brackets() {
        let walk = income_tax(150.0, &two_brackets());
        assert!((walk.total_tax - (10.0 + 10.0)).abs() < 1e-10);
        assert!((walk.marginal_rate - 0.20).abs() < 1e-10);
        assert_eq!(walk.details.len(), 2);
        assert!((walk.details[1].taxable_amount - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_and_negative_income() {
        let walk = income_tax(0.0, &two_brackets());
        assert_eq!(walk.total_tax, 0.0);
        assert!(walk.details.is_empty());

        let walk = income_tax(-100.0, &two_brackets());
        assert_eq!(walk.total_tax, 0.0);
    }
}

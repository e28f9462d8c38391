//! Allocation-weighted return calculation and risk-tolerance adjustment

use serde::{Deserialize, Serialize};

use super::table::{nearest_horizon_bucket, HistoricalReturnsTable};

/// Risk tolerance tier of the saver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Scalar applied to a base return to model more or less aggressive
    /// assumptions
    pub fn multiplier(&self) -> f64 {
        match self {
            RiskTolerance::Conservative => 0.85,
            RiskTolerance::Moderate => 1.0,
            RiskTolerance::Aggressive => 1.15,
        }
    }

    /// Parse a tier from its lowercase label; unrecognized labels are None
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "conservative" => Some(RiskTolerance::Conservative),
            "moderate" => Some(RiskTolerance::Moderate),
            "aggressive" => Some(RiskTolerance::Aggressive),
            _ => None,
        }
    }
}

/// One slice of a portfolio allocation
///
/// `asset_index` is the position within the historical-return table's
/// per-horizon row. A custom return, when present, takes precedence over the
/// table lookup. Percentages nominally sum to 100 but this is not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub asset_index: usize,
    pub percentage: f64,
    pub custom_return: Option<f64>,
}

impl AllocationEntry {
    pub fn new(asset_index: usize, percentage: f64) -> Self {
        Self {
            asset_index,
            percentage,
            custom_return: None,
        }
    }

    pub fn with_custom_return(asset_index: usize, percentage: f64, custom_return: f64) -> Self {
        Self {
            asset_index,
            percentage,
            custom_return: Some(custom_return),
        }
    }
}

/// Percentage-weighted annual return for an allocation over a time horizon
///
/// Entries with zero or negative percentage are skipped. An entry whose asset
/// position is missing from the selected bucket contributes a 0% rate rather
/// than failing. An empty or all-zero allocation returns 0.
pub fn weighted_return(
    allocations: &[AllocationEntry],
    horizon_years: f64,
    table: &HistoricalReturnsTable,
) -> f64 {
    let bucket = nearest_horizon_bucket(horizon_years);

    let mut weighted = 0.0;
    let mut percentage_sum = 0.0;

    for entry in allocations {
        if entry.percentage <= 0.0 {
            continue;
        }

        let rate = entry
            .custom_return
            .or_else(|| table.asset_return(bucket, entry.asset_index))
            .unwrap_or(0.0);

        weighted += rate * entry.percentage / 100.0;
        percentage_sum += entry.percentage;
    }

    if percentage_sum > 0.0 {
        weighted
    } else {
        0.0
    }
}

/// Apply the risk-tolerance multiplier to a base annual return.
/// An unknown tier leaves the base return unchanged.
pub fn risk_adjusted_return(base_return: f64, tier: Option<RiskTolerance>) -> f64 {
    base_return * tier.map(|t| t.multiplier()).unwrap_or(1.0)
}

//! Scenario runner for efficient batch projections
//!
//! Pre-loads the historical-return table and tax profiles once, then allows
//! running many calculations with different inputs without re-reading data
//! files.

use std::error::Error;
use std::path::Path;

use crate::inputs::{PlanInputs, WorkPeriod};
use crate::projection::{RetirementEngine, RetirementResult};
use crate::returns::{AllocationEntry, HistoricalReturnsTable};
use crate::tax::TaxProfiles;

/// One self-contained calculation request for batch runs
#[derive(Debug, Clone)]
pub struct CalculationRequest {
    pub inputs: PlanInputs,
    pub periods: Vec<WorkPeriod>,
    pub pension_allocation: Vec<AllocationEntry>,
    pub training_fund_allocation: Vec<AllocationEntry>,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// for tier in [RiskTolerance::Conservative, RiskTolerance::Aggressive] {
///     let mut inputs = base_inputs.clone();
///     inputs.risk_tolerance = Some(tier);
///     let result = runner.run(&inputs, &periods, &[], &[]);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    table: HistoricalReturnsTable,
    profiles: TaxProfiles,
}

impl ScenarioRunner {
    /// Create a runner with the in-memory return table and bundled profiles
    pub fn new() -> Self {
        Self {
            table: HistoricalReturnsTable::default_observed(),
            profiles: TaxProfiles::bundled(),
        }
    }

    /// Create a runner loading the return table from a CSV directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            table: HistoricalReturnsTable::from_csv_path(path)?,
            profiles: TaxProfiles::bundled(),
        })
    }

    /// Create a runner with a pre-built return table
    pub fn with_table(table: HistoricalReturnsTable) -> Self {
        Self {
            table,
            profiles: TaxProfiles::bundled(),
        }
    }

    /// Run a single calculation
    pub fn run(
        &self,
        inputs: &PlanInputs,
        periods: &[WorkPeriod],
        pension_allocation: &[AllocationEntry],
        training_fund_allocation: &[AllocationEntry],
    ) -> crate::error::Result<Option<RetirementResult>> {
        let engine = RetirementEngine::new(self.table.clone(), self.profiles.clone());
        engine.calculate(
            inputs,
            periods,
            pension_allocation,
            training_fund_allocation,
        )
    }

    /// Run a batch of independent requests sequentially
    pub fn run_batch(
        &self,
        requests: &[CalculationRequest],
    ) -> Vec<crate::error::Result<Option<RetirementResult>>> {
        requests
            .iter()
            .map(|request| {
                self.run(
                    &request.inputs,
                    &request.periods,
                    &request.pension_allocation,
                    &request.training_fund_allocation,
                )
            })
            .collect()
    }

    /// Reference to the loaded return table
    pub fn table(&self) -> &HistoricalReturnsTable {
        &self.table
    }

    /// Reference to the loaded tax profiles
    pub fn profiles(&self) -> &TaxProfiles {
        &self.profiles
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::RiskTolerance;

    fn request(tier: RiskTolerance) -> CalculationRequest {
        CalculationRequest {
            inputs: PlanInputs {
                current_age: 35,
                retirement_age: 67,
                monthly_expenses: 20_000.0,
                pension_balance: 150_000.0,
                risk_tolerance: Some(tier),
                ..PlanInputs::default()
            },
            periods: vec![WorkPeriod {
                country: "israel".to_string(),
                start_age: 35,
                end_age: 67,
                monthly_contribution: 3_000.0,
                monthly_training_contribution: 800.0,
                pension_annual_return: 7.0,
                deposit_fee_pct: 0.1,
                annual_fee_pct: 0.5,
            }],
            pension_allocation: Vec::new(),
            training_fund_allocation: Vec::new(),
        }
    }

    #[test]
    fn test_batch_preserves_order_and_tier_effect() {
        let runner = ScenarioRunner::new();
        let requests = vec![
            request(RiskTolerance::Conservative),
            request(RiskTolerance::Aggressive),
        ];

        let results = runner.run_batch(&requests);
        assert_eq!(results.len(), 2);

        let conservative = results[0].as_ref().unwrap().as_ref().unwrap();
        let aggressive = results[1].as_ref().unwrap().as_ref().unwrap();

        // A higher risk multiplier compounds to a larger pot
        assert!(aggressive.total_savings > conservative.total_savings);
    }
}

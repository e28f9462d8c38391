//! Sweep risk tiers and return assumptions over one career timeline
//!
//! The projection core is pure, so independent requests parallelize freely.

use rayon::prelude::*;
use retirement_planner::inputs::{PlanInputs, WorkPeriod};
use retirement_planner::returns::RiskTolerance;
use retirement_planner::scenario::{CalculationRequest, ScenarioRunner};
use std::time::Instant;

fn base_request() -> CalculationRequest {
    CalculationRequest {
        inputs: PlanInputs {
            current_age: 39,
            retirement_age: 67,
            monthly_expenses: 35_000.0,
            pension_balance: 100_000.0,
            training_fund_balance: 50_000.0,
            portfolio_balance: 80_000.0,
            ..PlanInputs::default()
        },
        periods: vec![WorkPeriod {
            country: "israel".to_string(),
            start_age: 39,
            end_age: 67,
            monthly_contribution: 4_266.6,
            monthly_training_contribution: 1_000.0,
            pension_annual_return: 8.0,
            deposit_fee_pct: 0.0,
            annual_fee_pct: 0.5,
        }],
        pension_allocation: Vec::new(),
        training_fund_allocation: Vec::new(),
    }
}

fn main() {
    env_logger::init();

    let tiers = [
        RiskTolerance::Conservative,
        RiskTolerance::Moderate,
        RiskTolerance::Aggressive,
    ];
    let return_deltas = [-2.0, -1.0, 0.0, 1.0, 2.0];

    let mut requests = Vec::new();
    for tier in tiers {
        for delta in return_deltas {
            let mut request = base_request();
            request.inputs.risk_tolerance = Some(tier);
            for period in &mut request.periods {
                period.pension_annual_return += delta;
            }
            requests.push((tier, delta, request));
        }
    }

    println!("Running {} scenarios...", requests.len());
    let start = Instant::now();

    let runner = ScenarioRunner::new();
    let results: Vec<_> = requests
        .par_iter()
        .map(|(tier, delta, request)| {
            let result = runner
                .run(
                    &request.inputs,
                    &request.periods,
                    &request.pension_allocation,
                    &request.training_fund_allocation,
                )
                .expect("Scenario calculation failed")
                .expect("Scenario plan window must be valid");
            (tier, delta, result)
        })
        .collect();

    println!("Completed in {:?}\n", start.elapsed());

    println!(
        "{:>14} {:>8} {:>16} {:>14} {:>8}",
        "Risk", "Delta", "TotalSavings", "NetIncome/mo", "Target"
    );
    println!("{}", "-".repeat(66));

    for (tier, delta, result) in &results {
        println!(
            "{:>14} {:>+8.1} {:>16.0} {:>14.0} {:>8}",
            format!("{:?}", tier),
            delta,
            result.total_savings,
            result.total_net_monthly_income,
            if result.achieves_target { "met" } else { "missed" },
        );
    }
}

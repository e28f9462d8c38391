//! Retirement Planner CLI
//!
//! Command-line interface for running a single retirement projection

use clap::Parser;
use retirement_planner::currency::{format_currency, Currency};
use retirement_planner::inputs::{load_work_periods, PlanInputs, WorkPeriod};
use retirement_planner::returns::RiskTolerance;
use retirement_planner::{HistoricalReturnsTable, RetirementEngine, TaxProfiles};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "retirement_planner", about = "Project retirement savings and income")]
struct Args {
    #[arg(long, default_value_t = 39)]
    current_age: u32,

    #[arg(long, default_value_t = 67)]
    retirement_age: u32,

    /// Current monthly expenses in ILS
    #[arg(long, default_value_t = 35_000.0)]
    monthly_expenses: f64,

    #[arg(long, default_value_t = 100_000.0)]
    pension_balance: f64,

    #[arg(long, default_value_t = 0.0)]
    training_fund_balance: f64,

    #[arg(long, default_value_t = 0.0)]
    portfolio_balance: f64,

    #[arg(long, default_value_t = 0.0)]
    crypto_balance: f64,

    #[arg(long, default_value_t = 0.0)]
    real_estate_balance: f64,

    /// Monthly pension contribution for the default single work period
    #[arg(long, default_value_t = 4_266.6)]
    monthly_contribution: f64,

    /// Annual pension return (%) for the default single work period
    #[arg(long, default_value_t = 8.0)]
    pension_return: f64,

    /// Annual pension management fee (%)
    #[arg(long, default_value_t = 0.5)]
    annual_fee: f64,

    /// Country code for the default single work period
    #[arg(long, default_value = "israel")]
    country: String,

    /// Risk tolerance: conservative, moderate, or aggressive
    #[arg(long, default_value = "moderate")]
    risk: String,

    #[arg(long, default_value_t = 3.0)]
    inflation: f64,

    /// Load the career timeline from a work_periods.csv instead of flags
    #[arg(long)]
    periods_csv: Option<PathBuf>,

    /// Write per-period projection rows to this CSV path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the full result as JSON instead of the table
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    println!("Retirement Planner v0.1.0");
    println!("=========================\n");

    let periods: Vec<WorkPeriod> = match &args.periods_csv {
        Some(path) => load_work_periods(path).expect("Failed to load work periods"),
        None => vec![WorkPeriod {
            country: args.country.clone(),
            start_age: args.current_age,
            end_age: args.retirement_age,
            monthly_contribution: args.monthly_contribution,
            monthly_training_contribution: 0.0,
            pension_annual_return: args.pension_return,
            deposit_fee_pct: 0.0,
            annual_fee_pct: args.annual_fee,
        }],
    };

    let inputs = PlanInputs {
        current_age: args.current_age,
        retirement_age: args.retirement_age,
        monthly_expenses: args.monthly_expenses,
        inflation_rate: args.inflation,
        risk_tolerance: RiskTolerance::from_label(&args.risk),
        pension_balance: args.pension_balance,
        training_fund_balance: args.training_fund_balance,
        portfolio_balance: args.portfolio_balance,
        crypto_balance: args.crypto_balance,
        real_estate_balance: args.real_estate_balance,
        ..PlanInputs::default()
    };

    println!("Plan: age {} -> {}", inputs.current_age, inputs.retirement_age);
    println!("  Monthly expenses: {}", format_currency(inputs.monthly_expenses, Currency::Ils));
    println!("  Work periods: {}", periods.len());
    println!();

    let engine = RetirementEngine::new(
        HistoricalReturnsTable::default_observed(),
        TaxProfiles::bundled(),
    );

    let result = engine
        .calculate(&inputs, &periods, &[], &[])
        .expect("Calculation failed");

    let Some(result) = result else {
        println!("No projection: retirement age must be greater than current age.");
        return;
    };

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&result).expect("Unable to serialize result");
        println!("{rendered}");
        return;
    }

    // Per-asset table
    println!(
        "{:<20} {:>16} {:>14} {:>14}",
        "Asset", "Value", "Gross/mo", "Net/mo"
    );
    println!("{}", "-".repeat(68));
    for (label, slice) in [
        ("Pension", &result.pension),
        ("Training fund", &result.training_fund),
        ("Personal portfolio", &result.personal_portfolio),
        ("Crypto", &result.crypto),
        ("Real estate", &result.real_estate),
    ] {
        println!(
            "{:<20} {:>16} {:>14} {:>14}",
            label,
            format_currency(slice.value, Currency::Ils),
            format_currency(slice.monthly_income_gross, Currency::Ils),
            format_currency(slice.monthly_income_net, Currency::Ils),
        );
    }

    println!("\nSummary:");
    println!(
        "  Total savings: {}",
        format_currency(result.total_savings, Currency::Ils)
    );
    println!(
        "  Total net monthly income: {}",
        format_currency(result.total_net_monthly_income, Currency::Ils)
    );
    println!(
        "  Future monthly expenses: {}",
        format_currency(result.future_monthly_expenses, Currency::Ils)
    );
    println!(
        "  Target monthly income: {}",
        format_currency(result.target_monthly_income, Currency::Ils)
    );
    println!(
        "  Blended pension tax rate: {:.1}%",
        result.blended_pension_tax_rate * 100.0
    );
    println!(
        "  Target {}: gap {}",
        if result.achieves_target { "met" } else { "missed" },
        format_currency(result.target_gap, Currency::Ils)
    );

    if let Some(path) = &args.output {
        let mut file = File::create(path).expect("Unable to create CSV file");

        writeln!(
            file,
            "Country,StartAge,EndAge,PeriodYears,OpeningBalance,NetMonthlyContribution,OpeningGrowth,ContributionGrowth,ClosingBalance"
        )
        .unwrap();

        for row in &result.periods {
            writeln!(
                file,
                "{},{},{},{},{:.8},{:.8},{:.8},{:.8},{:.8}",
                row.country,
                row.start_age,
                row.end_age,
                row.period_years,
                row.opening_balance,
                row.net_monthly_contribution,
                row.opening_growth,
                row.contribution_growth,
                row.closing_balance,
            )
            .unwrap();
        }

        println!("\nPer-period rows written to: {}", path.display());
    }
}

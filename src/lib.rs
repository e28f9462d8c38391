//! Retirement Planner - Projection engine for multi-asset retirement savings
//!
//! This library provides:
//! - Allocation-weighted return assumptions with risk-tier adjustment
//! - Work-period pension compounding with carry-forward balances
//! - Multi-asset aggregation with fixed withdrawal-rate income policies
//! - Country tax-bracket evaluation and blended pension tax rates
//! - Exchange-rate caching with TTL and fallback semantics

pub mod currency;
pub mod error;
pub mod inputs;
pub mod projection;
pub mod returns;
pub mod scenario;
pub mod tax;

// Re-export commonly used types
pub use error::{Error, Result};
pub use inputs::{PlanInputs, WorkPeriod};
pub use projection::{RetirementEngine, RetirementResult};
pub use returns::{AllocationEntry, HistoricalReturnsTable, RiskTolerance};
pub use scenario::ScenarioRunner;
pub use tax::TaxProfiles;

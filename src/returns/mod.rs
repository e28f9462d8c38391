//! Market return assumptions: historical return tables, allocation weighting,
//! and risk-tolerance adjustment

mod allocation;
mod table;

pub use allocation::{risk_adjusted_return, weighted_return, AllocationEntry, RiskTolerance};
pub use table::{nearest_horizon_bucket, HistoricalReturnsTable, HORIZON_BUCKETS};

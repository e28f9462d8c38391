//! Plan input structures and work-period loading

mod data;
pub mod loader;

pub use data::{PlanInputs, WorkPeriod};
pub use loader::{load_work_periods, load_work_periods_from_reader};

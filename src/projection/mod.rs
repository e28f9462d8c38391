//! Projection engine: work-period compounding, multi-asset aggregation, and
//! the aggregate retirement result

mod assets;
mod contributions;
mod engine;
mod result;

pub use assets::{
    monthly_rental_income, monthly_withdrawal, project_asset, CRYPTO_TAX_RATE, PORTFOLIO_TAX_RATE,
    REAL_ESTATE_TAX_RATE, STANDARD_WITHDRAWAL_RATE, TRAINING_FUND_WITHDRAWAL_RATE,
};
pub use contributions::{project_periods, PeriodOutcome, PeriodProjection};
pub use engine::RetirementEngine;
pub use result::{AssetSlice, RetirementResult};

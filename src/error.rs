//! Error taxonomy for the projection and conversion engines
//!
//! Two conditions are hard errors: malformed caller input (`Validation`) and
//! arithmetic that cannot produce a meaningful number (`Calculation`).
//! Degraded data paths — a missing allocation, an empty historical-returns
//! bucket, a failed exchange-rate fetch — resolve to defined fallback values
//! and never surface here.

use thiserror::Error;

/// Engine-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range caller input
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal arithmetic that cannot produce a meaningful number
    #[error("calculation error: {0}")]
    Calculation(String),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

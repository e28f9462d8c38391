//! Exchange-rate caching, conversion, and display formatting
//!
//! This is a side channel used only for display and conversion; the
//! projection math always runs in the base currency (ILS) and never touches
//! this module.

mod cache;
mod format;
mod provider;

use serde::{Deserialize, Serialize};

pub use cache::{CacheConfig, ExchangeRateCache, RateSnapshot, RateSource};
pub use format::format_currency;
pub use provider::{fallback_rates, HttpRateProvider, RateProvider, StaticRateProvider};

/// Supported display currencies. `Ils` is the base currency all stored rates
/// are quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Ils,
    Usd,
    Eur,
    Gbp,
    Btc,
    Eth,
}

impl Currency {
    /// The currency all rates are quoted relative to
    pub const BASE: Currency = Currency::Ils;

    /// All supported currencies
    pub const ALL: [Currency; 6] = [
        Currency::Ils,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Btc,
        Currency::Eth,
    ];

    /// ISO-style uppercase code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Ils => "ILS",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Btc => "BTC",
            Currency::Eth => "ETH",
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Ils => "\u{20AA}",
            Currency::Usd => "$",
            Currency::Eur => "\u{20AC}",
            Currency::Gbp => "\u{A3}",
            Currency::Btc => "\u{20BF}",
            Currency::Eth => "\u{39E}",
        }
    }

    /// Crypto currencies render with fractional precision
    pub fn is_crypto(&self) -> bool {
        matches!(self, Currency::Btc | Currency::Eth)
    }

    /// Parse an uppercase or lowercase code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "ILS" => Some(Currency::Ils),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "GBP" => Some(Currency::Gbp),
            "BTC" => Some(Currency::Btc),
            "ETH" => Some(Currency::Eth),
            _ => None,
        }
    }
}

/// Receipt for a single amount conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    pub original_amount: f64,
    pub converted_amount: f64,
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub rate: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

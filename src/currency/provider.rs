//! Rate provider port and its HTTP / static adapters

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde::Deserialize;

use super::Currency;

/// Connect-to-response budget for a single rate fetch
pub(crate) const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Static rate table used whenever a live fetch is unavailable.
/// Values are units of each currency per one ILS.
pub fn fallback_rates() -> HashMap<Currency, f64> {
    HashMap::from([
        (Currency::Ils, 1.0),
        (Currency::Usd, 0.27),
        (Currency::Eur, 0.25),
        (Currency::Gbp, 0.21),
        (Currency::Btc, 0.0000045),
        (Currency::Eth, 0.000081),
    ])
}

/// Narrow port through which the cache obtains fresh rates
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch rates quoted against the base currency
    async fn fetch_rates(&self) -> anyhow::Result<HashMap<Currency, f64>>;
}

/// JSON shape of the public exchange-rate endpoint
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

/// Live rate provider backed by a public exchange-rate API
pub struct HttpRateProvider {
    client: Client,
    url: String,
}

impl HttpRateProvider {
    pub fn new() -> Self {
        Self::with_url("https://api.exchangerate-api.com/v4/latest/ILS".to_string())
    }

    pub fn with_url(url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
            url,
        }
    }
}

impl Default for HttpRateProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn fetch_rates(&self) -> anyhow::Result<HashMap<Currency, f64>> {
        info!("Fetching exchange rates from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to send exchange-rate request")?;

        if !response.status().is_success() {
            anyhow::bail!("Exchange-rate API returned status: {}", response.status());
        }

        let body: RatesResponse = response
            .json()
            .await
            .context("Failed to parse exchange-rate response")?;

        let rates: HashMap<Currency, f64> = body
            .rates
            .iter()
            .filter_map(|(code, rate)| Currency::from_code(code).map(|c| (c, *rate)))
            .collect();

        if rates.is_empty() {
            anyhow::bail!("No supported currencies in exchange-rate response");
        }

        info!("Fetched {} exchange rates", rates.len());
        Ok(rates)
    }
}

/// Fixed-table provider for tests and offline use
pub struct StaticRateProvider {
    rates: HashMap<Currency, f64>,
}

impl StaticRateProvider {
    pub fn new(rates: HashMap<Currency, f64>) -> Self {
        Self { rates }
    }
}

impl Default for StaticRateProvider {
    fn default() -> Self {
        Self::new(fallback_rates())
    }
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    async fn fetch_rates(&self) -> anyhow::Result<HashMap<Currency, f64>> {
        Ok(self.rates.clone())
    }
}

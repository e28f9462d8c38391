//! Exchange-rate snapshot cache with TTL and fallback semantics
//!
//! The cache moves through three logical states: empty (no snapshot yet),
//! valid (snapshot younger than the TTL), and stale (TTL elapsed, refresh on
//! next access). A failed or timed-out refresh substitutes the static
//! fallback table instead of erroring — degraded rates are acceptable
//! service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{Error, Result};

use super::provider::{fallback_rates, RateProvider, FETCH_TIMEOUT};
use super::{Conversion, Currency};

/// Cache tuning knobs, injectable rather than hardcoded
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// How long a snapshot stays fresh
    pub ttl: Duration,

    /// Budget for one refresh attempt before falling back
    pub fetch_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            fetch_timeout: FETCH_TIMEOUT,
        }
    }
}

/// Where a snapshot's rates came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateSource {
    /// Fetched from the live provider
    Live,

    /// Static fallback table substituted after a failed fetch
    Fallback,
}

/// One process-wide set of exchange rates, replaced wholesale on refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Units of each currency per one base-currency unit
    pub rates: HashMap<Currency, f64>,

    pub last_updated: DateTime<Utc>,
    pub source: RateSource,
}

impl RateSnapshot {
    fn from_fallback() -> Self {
        Self {
            rates: fallback_rates(),
            last_updated: Utc::now(),
            source: RateSource::Fallback,
        }
    }

    /// Snapshot age relative to now
    pub fn age(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.last_updated)
            .to_std()
            .unwrap_or_default()
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }

    /// Rate for one currency; holes in the snapshot degrade to the static
    /// table rather than failing
    fn rate_of(&self, currency: Currency) -> f64 {
        self.rates.get(&currency).copied().unwrap_or_else(|| {
            fallback_rates()
                .get(&currency)
                .copied()
                .unwrap_or(1.0)
        })
    }
}

/// Owned exchange-rate cache
///
/// The snapshot lives behind an async mutex held across the refresh, which
/// makes refreshes single-flight: concurrent callers hitting a stale
/// snapshot serialize, and exactly one of them performs the fetch.
pub struct ExchangeRateCache {
    provider: Box<dyn RateProvider>,
    config: CacheConfig,
    snapshot: Mutex<Option<RateSnapshot>>,

    // Access statistics
    hits: AtomicU64,
    refreshes: AtomicU64,
}

impl ExchangeRateCache {
    /// Create a cache with default TTL and timeout
    pub fn new(provider: Box<dyn RateProvider>) -> Self {
        Self::with_config(provider, CacheConfig::default())
    }

    /// Create a cache with explicit configuration
    pub fn with_config(provider: Box<dyn RateProvider>, config: CacheConfig) -> Self {
        Self {
            provider,
            config,
            snapshot: Mutex::new(None),
            hits: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Current rate table, refreshing first if the snapshot is missing or
    /// stale
    pub async fn fetch_exchange_rates(&self) -> RateSnapshot {
        let mut guard = self.snapshot.lock().await;

        if let Some(snapshot) = guard.as_ref() {
            if snapshot.is_fresh(self.config.ttl) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return snapshot.clone();
            }
        }

        self.refreshes.fetch_add(1, Ordering::Relaxed);
        let refreshed =
            match tokio::time::timeout(self.config.fetch_timeout, self.provider.fetch_rates())
                .await
            {
                Ok(Ok(rates)) => {
                    info!("Exchange-rate snapshot refreshed ({} currencies)", rates.len());
                    RateSnapshot {
                        rates,
                        last_updated: Utc::now(),
                        source: RateSource::Live,
                    }
                }
                Ok(Err(err)) => {
                    warn!("Exchange-rate fetch failed: {err:#}; using fallback table");
                    RateSnapshot::from_fallback()
                }
                Err(_) => {
                    warn!(
                        "Exchange-rate fetch timed out after {:?}; using fallback table",
                        self.config.fetch_timeout
                    );
                    RateSnapshot::from_fallback()
                }
            };

        *guard = Some(refreshed.clone());
        refreshed
    }

    /// Exchange rate between two currencies, crossing through the base
    /// currency when neither side is the base
    pub async fn get_rate(&self, from: Currency, to: Currency) -> f64 {
        if from == to {
            return 1.0;
        }

        let snapshot = self.fetch_exchange_rates().await;

        if from == Currency::BASE {
            snapshot.rate_of(to)
        } else if to == Currency::BASE {
            1.0 / snapshot.rate_of(from)
        } else {
            snapshot.rate_of(to) / snapshot.rate_of(from)
        }
    }

    /// Convert an amount between currencies.
    /// Negative amounts are a caller input error.
    pub async fn convert_amount(
        &self,
        amount: f64,
        from: Currency,
        to: Currency,
    ) -> Result<Conversion> {
        if amount < 0.0 {
            return Err(Error::Validation(format!(
                "cannot convert negative amount: {amount}"
            )));
        }

        let rate = self.get_rate(from, to).await;
        Ok(Conversion {
            original_amount: amount,
            converted_amount: amount * rate,
            from_currency: from,
            to_currency: to,
            rate,
            timestamp: Utc::now(),
        })
    }

    /// Number of accesses served straight from a fresh snapshot
    pub fn cache_hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of refresh attempts performed
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    use async_trait::async_trait;

    struct CountingProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RateProvider for CountingProvider {
        async fn fetch_rates(&self) -> anyhow::Result<HashMap<Currency, f64>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HashMap::from([
                (Currency::Usd, 0.25),
                (Currency::Eur, 0.20),
            ]))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl RateProvider for FailingProvider {
        async fn fetch_rates(&self) -> anyhow::Result<HashMap<Currency, f64>> {
            anyhow::bail!("network unreachable")
        }
    }

    fn counting_cache(ttl: Duration) -> (ExchangeRateCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = ExchangeRateCache::with_config(
            Box::new(CountingProvider {
                calls: calls.clone(),
            }),
            CacheConfig {
                ttl,
                fetch_timeout: Duration::from_secs(1),
            },
        );
        (cache, calls)
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_hits_cache() {
        let (cache, calls) = counting_cache(Duration::from_secs(300));

        let first = cache.get_rate(Currency::Ils, Currency::Usd).await;
        let second = cache.get_rate(Currency::Ils, Currency::Usd).await;

        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.refresh_count(), 1);
        assert_eq!(cache.cache_hits(), 1);
    }

    #[tokio::test]
    async fn test_expired_ttl_triggers_exactly_one_refresh() {
        let (cache, calls) = counting_cache(Duration::ZERO);

        cache.get_rate(Currency::Ils, Currency::Usd).await;
        cache.get_rate(Currency::Ils, Currency::Usd).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_identity_rate_without_fetch() {
        let (cache, calls) = counting_cache(Duration::from_secs(300));

        let rate = cache.get_rate(Currency::Usd, Currency::Usd).await;
        assert_eq!(rate, 1.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cross_rate_through_base() {
        let (cache, _) = counting_cache(Duration::from_secs(300));

        let rate = cache.get_rate(Currency::Usd, Currency::Eur).await;
        assert!((rate - 0.20 / 0.25).abs() < 1e-10);

        let inverse = cache.get_rate(Currency::Usd, Currency::Ils).await;
        assert!((inverse - 4.0).abs() < 1e-10);
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_to_fallback() {
        let cache = ExchangeRateCache::new(Box::new(FailingProvider));

        let snapshot = cache.fetch_exchange_rates().await;
        assert_eq!(snapshot.source, RateSource::Fallback);

        let rate = cache.get_rate(Currency::Ils, Currency::Usd).await;
        assert!((rate - 0.27).abs() < 1e-10);
    }

    #[tokio::test]
    async fn test_negative_amount_is_validation_error() {
        let (cache, _) = counting_cache(Duration::from_secs(300));

        let result = cache
            .convert_amount(-10.0, Currency::Ils, Currency::Usd)
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_convert_amount_receipt() {
        let (cache, _) = counting_cache(Duration::from_secs(300));

        let conversion = cache
            .convert_amount(1_000.0, Currency::Ils, Currency::Usd)
            .await
            .unwrap();

        assert_eq!(conversion.from_currency, Currency::Ils);
        assert_eq!(conversion.to_currency, Currency::Usd);
        assert!((conversion.converted_amount - 250.0).abs() < 1e-10);
        assert!((conversion.rate - 0.25).abs() < 1e-10);
    }

    #[tokio::test]
    async fn test_concurrent_access_is_single_flight() {
        let (cache, calls) = counting_cache(Duration::from_secs(300));
        let cache = Arc::new(cache);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get_rate(Currency::Ils, Currency::Usd).await })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

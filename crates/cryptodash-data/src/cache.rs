//! Exchange-rate cache.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy)]
struct CachedRate {
    rate: f64,
    stored_at: DateTime<Utc>,
}

/// In-memory exchange rates keyed by currency pair (for example `BTC/USD`).
///
/// Entries expire `ttl` after they were inserted. Every call takes the
/// current instant, so expiry depends only on the clock the caller supplies.
///
/// The cache is owned by whoever fetches rates and handed to the code that
/// converts amounts:
///
/// ```
/// use chrono::{Duration, Utc};
/// use cryptodash_data::RateCache;
///
/// fn to_usd(amount: f64, pair: &str, rates: &RateCache) -> Option<f64> {
///     rates.get(pair, Utc::now()).map(|rate| amount * rate)
/// }
///
/// let mut rates = RateCache::new(Duration::minutes(5));
/// rates.insert("BTC/USD", 50_000.0, Utc::now());
///
/// assert_eq!(to_usd(0.5, "btc/usd", &rates), Some(25_000.0));
/// assert_eq!(to_usd(1.0, "ETH/USD", &rates), None);
/// ```
#[derive(Debug, Clone)]
pub struct RateCache {
    ttl: Duration,
    rates: HashMap<String, CachedRate>,
}

impl RateCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            rates: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Pair keys are case-insensitive.
    fn key(pair: &str) -> String {
        pair.trim().to_ascii_uppercase()
    }

    /// Fresh rate for `pair`, if any.
    pub fn get(&self, pair: &str, now: DateTime<Utc>) -> Option<f64> {
        self.rates
            .get(&Self::key(pair))
            .filter(|cached| now - cached.stored_at < self.ttl)
            .map(|cached| cached.rate)
    }

    /// Store a rate, replacing any previous one.
    pub fn insert(&mut self, pair: &str, rate: f64, now: DateTime<Utc>) {
        self.rates.insert(
            Self::key(pair),
            CachedRate {
                rate,
                stored_at: now,
            },
        );
    }

    /// Drop stale entries and return how many were removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.rates.len();
        let ttl = self.ttl;
        self.rates.retain(|_, cached| now - cached.stored_at < ttl);

        let purged = before - self.rates.len();
        if purged > 0 {
            tracing::debug!(purged, "expired exchange rates purged");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn clear(&mut self) {
        self.rates.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_get_within_ttl() {
        let mut cache = RateCache::new(Duration::seconds(60));
        cache.insert("btc/usd", 50_000.0, at(0));

        assert_eq!(cache.get("BTC/USD", at(59)), Some(50_000.0));
        assert_eq!(cache.get("BTC/USD", at(60)), None);
        assert_eq!(cache.get("ETH/USD", at(0)), None);
    }

    #[test]
    fn test_insert_refreshes_entry() {
        let mut cache = RateCache::new(Duration::seconds(10));
        cache.insert("ETH/USD", 3000.0, at(0));
        cache.insert("ETH/USD", 3100.0, at(8));

        assert_eq!(cache.get("ETH/USD", at(15)), Some(3100.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_purge_expired() {
        let mut cache = RateCache::new(Duration::seconds(30));
        cache.insert("BTC/USD", 1.0, at(0));
        cache.insert("ETH/USD", 2.0, at(20));

        assert_eq!(cache.purge_expired(at(40)), 1);
        assert_eq!(cache.get("ETH/USD", at(40)), Some(2.0));

        cache.clear();
        assert!(cache.is_empty());
    }
}

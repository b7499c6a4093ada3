use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::api::QuoteFetcher;
use crate::db::PriceStore;
use crate::models::PriceRecord;
use crate::utils::errors::PriceError;
use crate::utils::fixed_point::to_fixed_point;

/// Source tag of records kept fresh from CoinGecko
pub const DEFAULT_PROVIDER: &str = "coingecko";

/// Seconds a refreshed value stays trustworthy
pub const DEFAULT_STALE_AFTER_SECS: i64 = 300;

/// Decides whether a stored price needs to be re-fetched
#[derive(Debug, Clone)]
pub struct StalenessPolicy {
    provider: String,
    stale_after: Duration,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PROVIDER.to_string(), Duration::seconds(DEFAULT_STALE_AFTER_SECS))
    }
}

impl StalenessPolicy {
    pub fn new(provider: String, stale_after: Duration) -> Self {
        Self { provider, stale_after }
    }

    /// Records with no source, or another provider's source, are never stale.
    /// A record that was never refreshed is always stale. Otherwise it goes
    /// stale strictly after `stale_after` has elapsed.
    pub fn is_stale(&self, record: &PriceRecord, now: DateTime<Utc>) -> bool {
        if record.source.as_deref() != Some(self.provider.as_str()) {
            return false;
        }

        match record.updated_at {
            None => true,
            Some(updated_at) => now - updated_at > self.stale_after,
        }
    }
}

/// Serves stored prices and refreshes stale ones on read
pub struct PriceService<S, F> {
    store: S,
    fetcher: F,
    policy: StalenessPolicy,
}

impl<S: PriceStore, F: QuoteFetcher> PriceService<S, F> {
    pub fn new(store: S, fetcher: F, policy: StalenessPolicy) -> Self {
        Self { store, fetcher, policy }
    }

    /// Look up the price for `code`, refreshing it first when stale
    ///
    /// Only the initial read can fail. A failed or empty fetch, or a failed
    /// write-back, still returns a record.
    pub async fn resolve_price(&self, code: &str) -> Result<PriceRecord, PriceError> {
        let record = self
            .store
            .get_by_code(code)
            .await?
            .ok_or(PriceError::NotFound)?;

        let now = Utc::now();
        if !self.policy.is_stale(&record, now) {
            debug!("Price for {} is fresh (updated_at: {:?})", code, record.updated_at);
            return Ok(record);
        }

        Ok(self.refresh(record, code).await)
    }

    async fn refresh(&self, mut record: PriceRecord, code: &str) -> PriceRecord {
        let quote = match self.fetcher.fetch_quote(code).await {
            Ok(Some(quote)) => quote,
            Ok(None) => {
                debug!("No quote for {}; serving stored value", code);
                return record;
            }
            Err(e) => {
                warn!("Quote fetch for {} failed, serving stored value: {}", code, e);
                return record;
            }
        };

        let now = Utc::now();
        record.value = to_fixed_point(quote, record.decimal);
        record.updated_at = Some(now);

        if let Err(e) = self
            .store
            .update_value_and_timestamp(record.id, record.value, now)
            .await
        {
            warn!("Failed to persist refreshed price for {}: {}", code, e);
        } else {
            info!("Refreshed {} to {} (decimal {})", code, record.value, record.decimal);
        }

        record
    }
}

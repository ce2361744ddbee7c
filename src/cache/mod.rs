//! Query result cache.
//!
//! Results are stored with the time they were fetched. Each lookup states
//! how old a result it is willing to accept, so the staleness window is a
//! property of the caller rather than of the cache.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;
use tokio::time::Instant;

/// Default number of distinct queries kept
pub const DEFAULT_CAPACITY: u64 = 1_000;

/// A cached query result
#[derive(Debug, Clone)]
pub struct CachedResult {
    pub value: Arc<Value>,
    pub fetched_at: Instant,
}

impl CachedResult {
    fn is_fresh(&self, max_staleness: Duration) -> bool {
        self.fetched_at.elapsed() <= max_staleness
    }
}

/// Cache of query results keyed by query text and parameters
#[derive(Clone)]
pub struct QueryCache {
    entries: Cache<String, CachedResult>,
}

impl QueryCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Cached value for `key` if it is at most `max_staleness` old
    pub async fn get_fresh(&self, key: &str, max_staleness: Duration) -> Option<Arc<Value>> {
        let cached = self.entries.get(key).await?;
        if cached.is_fresh(max_staleness) {
            Some(cached.value)
        } else {
            tracing::debug!(
                age_ms = cached.fetched_at.elapsed().as_millis() as u64,
                "cached query result is stale"
            );
            None
        }
    }

    pub async fn insert(&self, key: String, value: Arc<Value>) {
        let entry = CachedResult {
            value,
            fetched_at: Instant::now(),
        };
        self.entries.insert(key, entry).await;
    }

    /// Return a fresh cached value, or run `fetch` and cache its result.
    ///
    /// A zero `max_staleness` always fetches. Failed fetches are not cached.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        max_staleness: Duration,
        fetch: F,
    ) -> Result<Arc<Value>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if !max_staleness.is_zero() {
            if let Some(value) = self.get_fresh(key, max_staleness).await {
                tracing::debug!("query cache hit");
                return Ok(value);
            }
        }

        let value = Arc::new(fetch().await?);
        if !max_staleness.is_zero() {
            self.insert(key.to_string(), value.clone()).await;
        }
        Ok(value)
    }

    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

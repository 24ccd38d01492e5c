//! Per-novel feed cache: rendered body plus fetch time, with a fixed TTL.
//!
//! One instance lives for the whole process. Entries are never evicted,
//! only overwritten when a stale id is requested again and the rebuild
//! succeeds; every id ever served stays resident (see DESIGN.md).

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::scraper::ScraperError;

/// How long a rendered feed stays fresh.
pub const TTL: Duration = Duration::from_secs(60 * 60);

struct CacheEntry {
    body: String,
    fetched_at: Instant,
}

/// Shared map of novel id -> last rendered feed.
///
/// The lock is held only for lookup and insert, never across an await, so
/// two concurrent misses for the same id both build and both write.
/// Last write wins; both bodies are equivalent, so this is tolerated
/// rather than deduplicated.
pub struct FeedCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl FeedCache {
    pub fn new() -> Self {
        Self::with_ttl(TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Serve `id` from cache, or run `build` and store its output.
    ///
    /// A build failure propagates without touching the map: a stale entry
    /// stays in place and the next request retries from scratch. Nothing
    /// partial is ever stored.
    pub async fn get_or_build<F, Fut>(&self, id: &str, build: F) -> Result<String, ScraperError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, ScraperError>>,
    {
        if let Some(body) = self.fresh(id) {
            tracing::info!(id, "cache hit");
            return Ok(body);
        }
        tracing::info!(id, "fetch");
        let body = build().await?;
        self.store(id, body.clone());
        Ok(body)
    }

    /// Stored body for `id` if present and younger than the TTL.
    fn fresh(&self, id: &str) -> Option<String> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        let entry = entries.get(id)?;
        (entry.fetched_at.elapsed() < self.ttl).then(|| entry.body.clone())
    }

    fn store(&self, id: &str, body: String) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            id.to_string(),
            CacheEntry {
                body,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Age the entry for `id` as if it had been fetched `by` earlier.
    #[cfg(test)]
    fn backdate(&self, id: &str, by: Duration) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if let Some(entry) = entries.get_mut(id) {
            entry.fetched_at = entry.fetched_at.checked_sub(by).expect("clock underflow");
        }
    }
}

impl Default for FeedCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn counted_build(
        cache: &FeedCache,
        id: &str,
        builds: &AtomicUsize,
    ) -> Result<String, ScraperError> {
        cache
            .get_or_build(id, || async {
                let n = builds.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(format!("body-{n}"))
            })
            .await
    }

    #[tokio::test]
    async fn fresh_entry_skips_rebuild_and_returns_identical_body() {
        let cache = FeedCache::new();
        let builds = AtomicUsize::new(0);

        let first = counted_build(&cache, "123", &builds).await.unwrap();
        // 30 minutes old: still fresh.
        cache.backdate("123", Duration::from_secs(30 * 60));
        let second = counted_build(&cache, "123", &builds).await.unwrap();

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);

        // 61 minutes old: stale, rebuilds.
        cache.backdate("123", Duration::from_secs(31 * 60));
        let third = counted_build(&cache, "123", &builds).await.unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 2);
        assert_eq!(third, "body-2");
    }

    #[tokio::test]
    async fn ids_are_cached_independently() {
        let cache = FeedCache::new();
        let builds = AtomicUsize::new(0);
        counted_build(&cache, "1", &builds).await.unwrap();
        counted_build(&cache, "2", &builds).await.unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_rebuild_keeps_stale_entry_and_retries() {
        let cache = FeedCache::new();
        let builds = AtomicUsize::new(0);

        counted_build(&cache, "9", &builds).await.unwrap();
        cache.backdate("9", Duration::from_secs(2 * 60 * 60));

        let err = cache
            .get_or_build("9", || async {
                Err(ScraperError::CatalogNotFound {
                    id: "9".to_string(),
                })
            })
            .await;
        assert!(err.is_err());

        // Stale entry untouched: the next call still goes to the builder.
        let body = counted_build(&cache, "9", &builds).await.unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 2);
        assert_eq!(body, "body-2");
    }
}

//! In-memory caching of the schedule for the current session.
//!
//! The feed changes rarely, so repeated loads within the TTL reuse the last
//! successful fetch instead of hitting the network again. Failed fetches are
//! never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Schedule;
use crate::feed::{FeedError, ScheduleSource};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 16,
        }
    }
}

/// Schedule source with caching.
///
/// Wraps any [`ScheduleSource`] and caches its schedule, keyed by the
/// source's name.
pub struct CachedScheduleSource<S> {
    source: S,
    cache: MokaCache<String, Arc<Schedule>>,
}

impl<S: ScheduleSource> CachedScheduleSource<S> {
    /// Create a new cached source.
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { source, cache }
    }

    /// Access the underlying source for fetches that bypass the cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries, forcing the next fetch to go to the
    /// source.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl<S: ScheduleSource> ScheduleSource for CachedScheduleSource<S> {
    fn name(&self) -> &str {
        self.source.name()
    }

    async fn fetch(&self) -> Result<Arc<Schedule>, FeedError> {
        let key = self.source.name().to_string();

        // Try cache first
        if let Some(cached) = self.cache.get(&key).await {
            debug!(source = %key, "schedule served from cache");
            return Ok(cached);
        }

        let schedule = self.source.fetch().await?;
        self.cache.insert(key, Arc::clone(&schedule)).await;

        Ok(schedule)
    }
}

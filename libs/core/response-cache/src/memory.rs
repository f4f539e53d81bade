use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::{CacheConfig, CacheError, CacheStore};

/// Process-local [`CacheStore`] on a `moka` cache.
///
/// An entry expires `sliding_expiration` after its last read or write, and
/// `absolute_expiration` after its last write, whichever comes first. Past
/// `max_entries`, moka's admission policy decides which entries are evicted.
#[derive(Clone)]
pub struct MemoryCache {
    inner: Cache<String, String>,
}

impl MemoryCache {
    pub fn new(config: CacheConfig) -> Self {
        let mut builder = Cache::builder()
            .time_to_live(config.absolute_expiration)
            .time_to_idle(config.sliding_expiration);
        if let Some(max) = config.max_entries {
            builder = builder.max_capacity(max as u64);
        }

        Self {
            inner: builder.build(),
        }
    }

    /// Approximate entry count; exact only after [`Self::run_pending_tasks`]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Apply pending evictions and expirations now
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.inner.get(key).await)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CacheError> {
        self.inner.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        let keys: Vec<_> = self
            .inner
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key)
            .collect();

        for key in &keys {
            self.inner.invalidate(key.as_str()).await;
        }
        debug!(cache_prefix = %prefix, removed = keys.len(), "Removed cache entries by prefix");
        Ok(keys.len())
    }
}

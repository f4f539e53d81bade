use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{CacheConfig, CacheError, CacheStore, MemoryCache};

/// Injected handle that services use to cache their read results.
///
/// Cloning shares the underlying store.
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    pub fn in_memory(config: CacheConfig) -> Self {
        Self::new(Arc::new(MemoryCache::new(config)))
    }

    /// Return the cached value under `key`, or run `load` and cache its result.
    ///
    /// Errors from `load` are returned as-is and nothing is cached. A corrupt
    /// entry is dropped and reloaded.
    pub async fn get_or_load<T, E, F, Fut>(&self, key: &str, load: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.lookup(key).await {
            Ok(Some(value)) => {
                debug!(cache_key = %key, "Cache hit");
                return Ok(value);
            }
            Ok(None) => debug!(cache_key = %key, "Cache miss"),
            Err(e) => warn!(
                cache_key = %key,
                error = %e,
                "Cache read failed, loading from repository"
            ),
        }

        let value = load().await?;
        self.put(key, &value).await;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous entry
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) {
        let result = match serde_json::to_string(value) {
            Ok(json) => self.store.set(key, json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            warn!(cache_key = %key, error = %e, "Cache write failed");
        }
    }

    pub async fn invalidate(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            warn!(cache_key = %key, error = %e, "Cache invalidation failed");
        }
    }

    pub async fn invalidate_prefix(&self, prefix: &str) {
        match self.store.remove_prefix(prefix).await {
            Ok(removed) => debug!(cache_prefix = %prefix, removed, "Cache entries invalidated"),
            Err(e) => warn!(cache_prefix = %prefix, error = %e, "Cache invalidation failed"),
        }
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let Some(json) = self.store.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.invalidate(key).await;
                Err(e.into())
            }
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::in_memory(CacheConfig::default())
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache").finish_non_exhaustive()
    }
}

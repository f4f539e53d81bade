use async_trait::async_trait;

use crate::CacheError;

/// Key/value storage for serialized responses.
///
/// Every call is atomic on its own; a `get` followed by a `set` is not.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a live entry, refreshing its sliding expiration
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Insert or replace an entry, restarting both expirations
    async fn set(&self, key: &str, value: String) -> Result<(), CacheError>;

    async fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Remove every entry whose key starts with `prefix`, returning how many went
    async fn remove_prefix(&self, prefix: &str) -> Result<usize, CacheError>;
}

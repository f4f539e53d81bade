//! Read-through cache for serialized API responses.
//!
//! Services hold a [`ResponseCache`] and wrap repository reads in
//! [`ResponseCache::get_or_load`]. Writes invalidate through the same handle once
//! the repository has committed. Entries live in a [`CacheStore`]; the bundled
//! [`MemoryCache`] is a `moka` cache with sliding and absolute expiration.
//!
//! Cache faults never fail a request: they are logged at `warn` and the caller
//! falls through to the repository.

mod config;
mod error;
mod keys;
mod memory;
mod service;
mod store;

pub use config::CacheConfig;
pub use error::CacheError;
pub use keys::CacheKeys;
pub use memory::MemoryCache;
pub use service::ResponseCache;
pub use store::CacheStore;

#[cfg(test)]
pub use store::MockCacheStore;

use core_config::{ConfigError, FromEnv, env_parse};
use std::time::Duration;

/// Expiration and capacity settings for [`crate::MemoryCache`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Hard lifetime measured from insertion
    pub absolute_expiration: Duration,
    /// Lifetime measured from the last read or write
    pub sliding_expiration: Duration,
    /// `None` leaves the cache unbounded
    pub max_entries: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            absolute_expiration: Duration::from_secs(30),
            sliding_expiration: Duration::from_secs(15),
            max_entries: Some(10_000),
        }
    }
}

impl FromEnv for CacheConfig {
    /// - CACHE_ABSOLUTE_EXPIRATION_SECS: defaults to 30
    /// - CACHE_SLIDING_EXPIRATION_SECS: defaults to 15
    /// - CACHE_MAX_ENTRIES: defaults to 10000, 0 disables the bound
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let absolute = env_parse(
            "CACHE_ABSOLUTE_EXPIRATION_SECS",
            defaults.absolute_expiration.as_secs(),
        )?;
        let sliding = env_parse(
            "CACHE_SLIDING_EXPIRATION_SECS",
            defaults.sliding_expiration.as_secs(),
        )?;
        let max_entries = env_parse("CACHE_MAX_ENTRIES", 10_000usize)?;

        Ok(Self {
            absolute_expiration: Duration::from_secs(absolute),
            sliding_expiration: Duration::from_secs(sliding),
            max_entries: (max_entries > 0).then_some(max_entries),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 3] = [
        "CACHE_ABSOLUTE_EXPIRATION_SECS",
        "CACHE_SLIDING_EXPIRATION_SECS",
        "CACHE_MAX_ENTRIES",
    ];

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(VARS, || {
            assert_eq!(CacheConfig::from_env().unwrap(), CacheConfig::default());
        });
    }

    #[test]
    fn test_zero_max_entries_means_unbounded() {
        temp_env::with_vars(
            [
                ("CACHE_ABSOLUTE_EXPIRATION_SECS", Some("60")),
                ("CACHE_SLIDING_EXPIRATION_SECS", Some("20")),
                ("CACHE_MAX_ENTRIES", Some("0")),
            ],
            || {
                let config = CacheConfig::from_env().unwrap();
                assert_eq!(config.absolute_expiration, Duration::from_secs(60));
                assert_eq!(config.sliding_expiration, Duration::from_secs(20));
                assert_eq!(config.max_entries, None);
            },
        );
    }

    #[test]
    fn test_invalid_duration_is_rejected() {
        temp_env::with_var("CACHE_SLIDING_EXPIRATION_SECS", Some("15s"), || {
            let err = CacheConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("CACHE_SLIDING_EXPIRATION_SECS"));
        });
    }
}

use core_config::{ConfigError, FromEnv, env_parse};

/// Server-side paging limits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Used when the request omits `pageSize`
    pub default_page_size: u64,
    /// Requests above this are clamped, never rejected
    pub max_page_size: u64,
}

impl PaginationConfig {
    pub const DEFAULT_PAGE_SIZE: u64 = 10;
    pub const MAX_PAGE_SIZE: u64 = 50;

    pub fn new(default_page_size: u64, max_page_size: u64) -> Self {
        Self {
            default_page_size,
            max_page_size,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE, Self::MAX_PAGE_SIZE)
    }
}

impl FromEnv for PaginationConfig {
    /// - PAGINATION_DEFAULT_PAGE_SIZE: defaults to 10
    /// - PAGINATION_MAX_PAGE_SIZE: defaults to 50
    fn from_env() -> Result<Self, ConfigError> {
        let default_page_size = env_parse("PAGINATION_DEFAULT_PAGE_SIZE", Self::DEFAULT_PAGE_SIZE)?;
        let max_page_size = env_parse("PAGINATION_MAX_PAGE_SIZE", Self::MAX_PAGE_SIZE)?;

        if max_page_size == 0 {
            return Err(ConfigError::ParseError {
                key: "PAGINATION_MAX_PAGE_SIZE".to_string(),
                details: "must be at least 1".to_string(),
            });
        }
        if default_page_size == 0 || default_page_size > max_page_size {
            return Err(ConfigError::ParseError {
                key: "PAGINATION_DEFAULT_PAGE_SIZE".to_string(),
                details: format!("must be between 1 and {max_page_size}"),
            });
        }

        Ok(Self::new(default_page_size, max_page_size))
    }
}

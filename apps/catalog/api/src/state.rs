//! Shared application state.
//!
//! Built once in `main`; the response cache, JWT verifier and rate limiter
//! are created here and handed to every router that needs them.

use axum_helpers::{JwtAuth, RateLimit};
use database::postgres::DatabaseConnection;
use response_cache::ResponseCache;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
    /// One cache shared by both domains
    pub cache: ResponseCache,
    pub jwt: JwtAuth,
    pub rate_limit: RateLimit,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        let cache = ResponseCache::in_memory(config.cache);
        let jwt = JwtAuth::new(&config.jwt);
        let rate_limit = RateLimit::new(config.rate_limit);

        Self {
            config,
            db,
            cache,
            jwt,
            rate_limit,
        }
    }
}

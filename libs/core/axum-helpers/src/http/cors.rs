use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, FromEnv, env_required};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::versioning::{API_VERSION_HEADER, SUPPORTED_VERSIONS_HEADER};

/// Browser origins allowed to call the API
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<HeaderValue>,
}

impl CorsConfig {
    /// Parse a comma-separated origin list, ignoring blanks
    pub fn parse(origins: &str) -> Result<Self, ConfigError> {
        let invalid = |details: String| ConfigError::ParseError {
            key: "CORS_ALLOWED_ORIGIN".to_string(),
            details,
        };

        let allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<HeaderValue>().map_err(|e| invalid(format!("{s}: {e}"))))
            .collect::<Result<Vec<_>, _>>()?;

        if allowed_origins.is_empty() {
            return Err(invalid("at least one origin is required".to_string()));
        }

        Ok(Self { allowed_origins })
    }
}

impl FromEnv for CorsConfig {
    /// - CORS_ALLOWED_ORIGIN (required), e.g. `http://localhost:3000,https://catalog.example.com`
    fn from_env() -> Result<Self, ConfigError> {
        Self::parse(&env_required("CORS_ALLOWED_ORIGIN")?)
    }
}

pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            API_VERSION_HEADER,
        ])
        .expose_headers([
            SUPPORTED_VERSIONS_HEADER,
            axum::http::HeaderName::from_static("x-pagination"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

//! # Axum Helpers
//!
//! Shared building blocks for the catalog HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: Bearer JWT verification and role guards
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS, security headers, rate limiting, API versioning
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Integer id path, query string and validated JSON body extractors
//! - **[`audit`]**: Audit events for mutating requests
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use axum_helpers::http::CorsConfig;
//! use core_config::{FromEnv, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = create_router::<ApiDoc>(Router::new(), &CorsConfig::from_env()?);
//!     create_production_app(router, &ServerConfig::from_env()?, async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    ACCESS_TOKEN_TTL, AuthError, JwtAuth, JwtClaims, JwtConfig, RoleGuard,
    optional_jwt_auth_middleware, require_role,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{
    ApiVersion, CorsConfig, RateLimit, RateLimitConfig, api_version_middleware, create_cors_layer,
    rate_limit_middleware, security_headers,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, QueryParams, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};

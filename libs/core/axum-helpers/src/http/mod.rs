//! Cross-cutting HTTP middleware: CORS, security headers, rate limiting and
//! API version negotiation.

pub mod cors;
pub mod rate_limit;
pub mod security;
pub mod versioning;

pub use cors::{CorsConfig, create_cors_layer};
pub use rate_limit::{RateLimit, RateLimitConfig, rate_limit_middleware};
pub use security::security_headers;
pub use versioning::{ApiVersion, SUPPORTED_VERSIONS_HEADER, api_version_middleware};

//! Bearer token verification and role checks.
//!
//! Tokens are HS256 JWTs signed with the shared `JWT_SECRET`; issuing them is
//! the identity provider's job; [`JwtAuth::create_access_token`] exists for
//! tooling and tests.
//!
//! ```ignore
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let app = Router::new()
//!     .merge(protected.layer(from_fn_with_state(RoleGuard::new(auth.clone(), "User"), require_role)))
//!     .layer(from_fn_with_state(auth, optional_jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, AuthError, JwtAuth, JwtClaims};
pub use middleware::{RoleGuard, bearer_token, optional_jwt_auth_middleware, require_role};

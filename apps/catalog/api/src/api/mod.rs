use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use axum_helpers::{
    JwtAuth, RateLimit, api_version_middleware, optional_jwt_auth_middleware,
    rate_limit_middleware,
};

use crate::state::AppState;

pub mod categories;
pub mod health;
pub mod products;
pub mod version;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by `axum_helpers::create_router`.
pub fn routes(state: &AppState) -> Router {
    let apis = Router::new()
        .nest(domain_categories::handlers::URL, categories::router(state))
        .nest(domain_products::handlers::URL, products::router(state))
        .merge(version::router());

    with_request_policies(apis, state.jwt.clone(), state.rate_limit.clone())
}

/// Wraps `apis` so every request gets, outermost first: optional bearer
/// claims, the rate limiter (partitioned by those claims), API version
/// resolution.
pub fn with_request_policies(apis: Router, jwt: JwtAuth, rate_limit: RateLimit) -> Router {
    apis.layer(from_fn(api_version_middleware))
        .layer(from_fn_with_state(rate_limit, rate_limit_middleware))
        .layer(from_fn_with_state(jwt, optional_jwt_auth_middleware))
}

/// `/ready` with a real database check; merged next to the stateless app router
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

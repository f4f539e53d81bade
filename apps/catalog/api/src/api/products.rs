use axum::Router;
use axum_helpers::RoleGuard;
use domain_products::{PgProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Role required for the unpaged `/produtos/todos` listing
pub const FULL_LISTING_ROLE: &str = "User";

pub fn router(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository, state.cache.clone(), state.config.pagination);
    handlers::router(service, RoleGuard::new(state.jwt.clone(), FULL_LISTING_ROLE))
}

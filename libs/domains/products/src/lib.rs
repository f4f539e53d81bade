//! Products Domain
//!
//! Catalog products with paged listings filtered by name or price, a guarded
//! unpaged listing, per-category listing and partial updates of stock and
//! registration date.
//!
//! ```text
//! handlers   → HTTP routes under /produtos, OpenAPI
//! service    → paging rules, response cache, patch rules
//! repository → in-memory and PostgreSQL storage
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, PatchProduct, PriceCondition, PriceCriterion, PriceFilter, Product,
    ProductFilter, UpdateProduct,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;

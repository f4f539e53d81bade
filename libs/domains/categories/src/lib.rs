//! Categories Domain
//!
//! CRUD over product categories with paged, cached listings.
//!
//! ```text
//! handlers   → HTTP routes under /categorias, OpenAPI
//! service    → paging rules, response cache, invalidation
//! repository → in-memory and PostgreSQL storage
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::{handlers, InMemoryCategoryRepository, CategoryService};
//! use pagination::PaginationConfig;
//! use response_cache::ResponseCache;
//!
//! let service = CategoryService::new(
//!     InMemoryCategoryRepository::new(),
//!     ResponseCache::default(),
//!     PaginationConfig::default(),
//! );
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use models::{Category, CreateCategory, UpdateCategory};
pub use postgres::PgCategoryRepository;
pub use repository::{CategoryRepository, InMemoryCategoryRepository};
pub use service::CategoryService;

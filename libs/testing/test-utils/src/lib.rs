//! Shared test utilities for the catalog domains
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let category_name = builder.name("categoria", "main");
//! }
//! ```
//!
//! Tests that need a container are marked `#[ignore = "requires Docker"]`; run
//! them with `cargo test -- --ignored`.

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// The seeded migrations share the database with every test, so names derived
/// from the test name keep filters from matching another test's rows.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_category");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique name no longer than 80 characters
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("produto", "main");
    /// assert!(name.starts_with("t-produto-"));
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        let name = format!("t-{}-{:x}-{}", prefix, self.seed, suffix);
        name.chars().take(80).collect()
    }

    /// Marker shared by every name this builder produces, for `nome` filters
    pub fn marker(&self) -> String {
        format!("{:x}", self.seed)
    }
}

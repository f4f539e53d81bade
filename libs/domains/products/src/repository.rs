use async_trait::async_trait;
use chrono::Utc;
use pagination::{PageParams, PagedList, paginate};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilter};

/// Persistence port for products; every listing is ordered by id
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self, filter: ProductFilter, params: PageParams) -> ProductResult<PagedList<Product>>;

    /// Whole catalog, unpaged
    async fn list_all(&self) -> ProductResult<Vec<Product>>;

    async fn list_by_category(&self, category_id: i32) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Fails with `UnknownCategory` when the category does not exist
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Replace a stored product; `None` when the id does not exist
    async fn update(&self, product: Product) -> ProductResult<Option<Product>>;

    /// Remove and return a product; `None` when the id does not exist
    async fn delete(&self, id: i32) -> ProductResult<Option<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Category ids are not checked; there is no category table to check against.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<State>>,
}

#[derive(Debug, Default)]
struct State {
    products: BTreeMap<i32, Product>,
    last_id: i32,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self, filter: ProductFilter, params: PageParams) -> ProductResult<PagedList<Product>> {
        let state = self.state.read().await;

        Ok(paginate(
            state.products.values().cloned(),
            |p| filter.matches(p),
            |a, b| a.id.cmp(&b.id),
            params,
        ))
    }

    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn list_by_category(&self, category_id: i32) -> ProductResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut state = self.state.write().await;

        state.last_id += 1;
        let product = Product {
            id: state.last_id,
            name: input.name,
            description: input.description,
            price: input.price,
            image_url: input.image_url,
            stock: input.stock,
            registered_at: Utc::now(),
            category_id: input.category_id,
        };
        state.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, product: Product) -> ProductResult<Option<Product>> {
        let mut state = self.state.write().await;

        let Some(stored) = state.products.get_mut(&product.id) else {
            return Ok(None);
        };
        *stored = product.clone();

        tracing::info!(product_id = product.id, "Updated product");
        Ok(Some(product))
    }

    async fn delete(&self, id: i32) -> ProductResult<Option<Product>> {
        let mut state = self.state.write().await;

        let removed = state.products.remove(&id);
        if removed.is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }
}

//! Product Service - Business logic layer

use chrono::Utc;
use pagination::{NameFilter, PageQuery, PagedList, PaginationConfig};
use response_cache::{CacheKeys, ResponseCache};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, PatchProduct, PriceFilter, Product, ProductFilter, UpdateProduct,
};
use crate::repository::ProductRepository;

pub const CACHE_KEYS: CacheKeys = CacheKeys::new("produtos");

/// Product use cases with read-through caching.
///
/// Every listing, including the unpaged and per-category ones, is cached under
/// the collection prefix so one invalidation covers them all.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    cache: ResponseCache,
    pagination: PaginationConfig,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, cache: ResponseCache, pagination: PaginationConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            cache,
            pagination,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, query: PageQuery) -> ProductResult<PagedList<Product>> {
        self.list_filtered(query, ProductFilter::default()).await
    }

    #[instrument(skip(self))]
    pub async fn list_products_by_name(
        &self,
        query: PageQuery,
        filter: NameFilter,
    ) -> ProductResult<PagedList<Product>> {
        self.list_filtered(query, ProductFilter::by_name(filter)).await
    }

    #[instrument(skip(self))]
    pub async fn list_products_by_price(
        &self,
        query: PageQuery,
        filter: PriceFilter,
    ) -> ProductResult<PagedList<Product>> {
        self.list_filtered(query, ProductFilter::by_price(filter.condition()))
            .await
    }

    async fn list_filtered(
        &self,
        query: PageQuery,
        filter: ProductFilter,
    ) -> ProductResult<PagedList<Product>> {
        let params = query.normalize(&self.pagination)?;
        let mut shape = vec![
            ("page", params.page_number.to_string()),
            ("size", params.page_size.to_string()),
        ];
        shape.extend(filter.cache_shape());
        let key = CACHE_KEYS.list(shape);

        self.cache
            .get_or_load(&key, || self.repository.list(filter, params))
            .await
    }

    /// Whole catalog; an empty catalog is `NoProducts`
    #[instrument(skip(self))]
    pub async fn list_all_products(&self) -> ProductResult<Vec<Product>> {
        let key = CACHE_KEYS.list([("todos", "")]);
        self.cache
            .get_or_load(&key, || async {
                let products = self.repository.list_all().await?;
                if products.is_empty() {
                    tracing::warn!("No products found");
                    return Err(ProductError::NoProducts);
                }
                Ok(products)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_products_by_category(&self, category_id: i32) -> ProductResult<Vec<Product>> {
        let key = CACHE_KEYS.list([("categoria", category_id)]);
        self.cache
            .get_or_load(&key, || async {
                let products = self.repository.list_by_category(category_id).await?;
                if products.is_empty() {
                    tracing::warn!(category_id, "No products found for category");
                    return Err(ProductError::NoProductsInCategory(category_id));
                }
                Ok(products)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.cache
            .get_or_load(&CACHE_KEYS.item(id), || self.load(id))
            .await
    }

    #[instrument(skip(self, input), fields(nome = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = self.repository.create(input).await?;
        self.cache.invalidate_prefix(&CACHE_KEYS.list_prefix()).await;
        Ok(product)
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        if input.id != id {
            return Err(ProductError::IdMismatch {
                path: id,
                body: input.id,
            });
        }

        let current = self.load(id).await?;
        self.store(input.apply_to(&current)).await
    }

    /// Change stock and/or registration date only
    #[instrument(skip(self, patch))]
    pub async fn patch_product(&self, id: i32, patch: PatchProduct) -> ProductResult<Product> {
        if patch.is_empty() {
            return Err(ProductError::Validation(
                "At least one of estoque or dataCadastro is required".to_string(),
            ));
        }
        patch
            .check_registration_date(Utc::now())
            .map_err(ProductError::Validation)?;

        let mut product = self.load(id).await?;
        patch.apply(&mut product);
        self.store(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<Product> {
        let product = self
            .repository
            .delete(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        self.cache.invalidate_prefix(&CACHE_KEYS.list_prefix()).await;
        self.cache.invalidate(&CACHE_KEYS.item(id)).await;
        Ok(product)
    }

    async fn load(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    async fn store(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let product = self
            .repository
            .update(product)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        self.cache.invalidate_prefix(&CACHE_KEYS.list_prefix()).await;
        self.cache.put(&CACHE_KEYS.item(id), &product).await;
        Ok(product)
    }
}

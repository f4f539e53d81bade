use pagination::{NameFilter, PageQuery, PagedList, PaginationConfig};
use response_cache::{CacheKeys, ResponseCache};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

pub const CACHE_KEYS: CacheKeys = CacheKeys::new("categorias");

/// Category use cases with read-through caching.
///
/// Writes reach the repository first; cached lists and the item key are dropped
/// only once the write succeeded.
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
    cache: ResponseCache,
    pagination: PaginationConfig,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R, cache: ResponseCache, pagination: PaginationConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            cache,
            pagination,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        query: PageQuery,
        filter: NameFilter,
    ) -> CategoryResult<PagedList<Category>> {
        let params = query.normalize(&self.pagination)?;
        let key = CACHE_KEYS.list([
            ("page", params.page_number.to_string()),
            ("size", params.page_size.to_string()),
            ("nome", filter.term().unwrap_or_default().to_lowercase()),
        ]);

        self.cache
            .get_or_load(&key, || self.repository.list(filter, params))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: i32) -> CategoryResult<Category> {
        self.cache
            .get_or_load(&CACHE_KEYS.item(id), || async {
                self.repository
                    .get_by_id(id)
                    .await?
                    .ok_or(CategoryError::NotFound(id))
            })
            .await
    }

    #[instrument(skip(self, input), fields(nome = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        let category = self.repository.create(input).await?;
        self.cache.invalidate_prefix(&CACHE_KEYS.list_prefix()).await;
        Ok(category)
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(&self, id: i32, input: UpdateCategory) -> CategoryResult<Category> {
        if input.id != id {
            return Err(CategoryError::IdMismatch {
                path: id,
                body: input.id,
            });
        }

        let category = self
            .repository
            .update(input.into())
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        self.cache.invalidate_prefix(&CACHE_KEYS.list_prefix()).await;
        self.cache.put(&CACHE_KEYS.item(id), &category).await;
        Ok(category)
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: i32) -> CategoryResult<Category> {
        let category = self
            .repository
            .delete(id)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        self.cache.invalidate_prefix(&CACHE_KEYS.list_prefix()).await;
        self.cache.invalidate(&CACHE_KEYS.item(id)).await;
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryCategoryRepository, MockCategoryRepository};
    use mockall::predicate::eq;
    use pagination::PaginationError;
    use response_cache::CacheConfig;

    fn category(id: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            image_url: String::new(),
        }
    }

    fn service<R: CategoryRepository>(repository: R) -> CategoryService<R> {
        CategoryService::new(
            repository,
            ResponseCache::in_memory(CacheConfig::default()),
            PaginationConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_repeated_get_is_served_from_cache() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_get_by_id()
            .with(eq(4))
            .times(1)
            .returning(|id| Ok(Some(category(id, "Bebidas"))));
        let service = service(repo);

        let first = service.get_category(4).await.unwrap();
        let second = service.get_category(4).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_category_is_not_cached() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_get_by_id().times(2).returning(|_| Ok(None));
        let service = service(repo);

        for _ in 0..2 {
            assert!(matches!(
                service.get_category(8).await,
                Err(CategoryError::NotFound(8))
            ));
        }
    }

    #[tokio::test]
    async fn test_repeated_list_is_served_from_cache() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_list().times(1).returning(|_, params| {
            Ok(PagedList::new(vec![category(1, "Bebidas")], 1, params))
        });
        let service = service(repo);

        let query = PageQuery::new(1, 5);
        let first = service.list_categories(query, NameFilter::default()).await.unwrap();
        let second = service.list_categories(query, NameFilter::default()).await.unwrap();
        assert_eq!(first.items, second.items);
        assert_eq!(second.total_count, 1);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected_before_repository() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_list().never();
        let service = service(repo);

        let result = service
            .list_categories(PageQuery::new(1, 0), NameFilter::default())
            .await;
        assert!(matches!(
            result,
            Err(CategoryError::Pagination(PaginationError::InvalidPageSize(0)))
        ));
    }

    #[tokio::test]
    async fn test_id_mismatch_never_reaches_repository() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_update().never();
        let service = service(repo);

        let input = UpdateCategory {
            id: 2,
            name: "x".into(),
            image_url: String::new(),
        };
        assert!(matches!(
            service.update_category(1, input).await,
            Err(CategoryError::IdMismatch { path: 1, body: 2 })
        ));
    }

    #[tokio::test]
    async fn test_create_invalidates_cached_lists() {
        let service = service(InMemoryCategoryRepository::new());
        let input = |name: &str| CreateCategory {
            name: name.to_string(),
            image_url: String::new(),
        };

        service.create_category(input("Bebidas")).await.unwrap();
        let before = service
            .list_categories(PageQuery::default(), NameFilter::default())
            .await
            .unwrap();
        assert_eq!(before.total_count, 1);

        service.create_category(input("Lanches")).await.unwrap();
        let after = service
            .list_categories(PageQuery::default(), NameFilter::default())
            .await
            .unwrap();
        assert_eq!(after.total_count, 2);
    }

    #[tokio::test]
    async fn test_update_is_visible_on_next_read() {
        let service = service(InMemoryCategoryRepository::new());
        let created = service
            .create_category(CreateCategory {
                name: "Bebidas".into(),
                image_url: String::new(),
            })
            .await
            .unwrap();
        service.get_category(created.id).await.unwrap();

        service
            .update_category(
                created.id,
                UpdateCategory {
                    id: created.id,
                    name: "Bebidas geladas".into(),
                    image_url: "gelo.jpg".into(),
                },
            )
            .await
            .unwrap();

        let read = service.get_category(created.id).await.unwrap();
        assert_eq!(read.name, "Bebidas geladas");
    }

    #[tokio::test]
    async fn test_delete_drops_cached_item() {
        let service = service(InMemoryCategoryRepository::new());
        let created = service
            .create_category(CreateCategory {
                name: "Sobremesas".into(),
                image_url: String::new(),
            })
            .await
            .unwrap();
        service.get_category(created.id).await.unwrap();

        let deleted = service.delete_category(created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(matches!(
            service.get_category(created.id).await,
            Err(CategoryError::NotFound(_))
        ));
    }
}

use async_trait::async_trait;
use pagination::{NameFilter, PageParams, PagedList, paginate};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory};

/// Persistence port for categories.
///
/// Lists are ordered by name, then id, and sliced to the requested page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self, filter: NameFilter, params: PageParams) -> CategoryResult<PagedList<Category>>;

    async fn get_by_id(&self, id: i32) -> CategoryResult<Option<Category>>;

    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    /// Replace a stored category; `None` when the id does not exist
    async fn update(&self, category: Category) -> CategoryResult<Option<Category>>;

    /// Remove and return a category; `None` when the id does not exist
    async fn delete(&self, id: i32) -> CategoryResult<Option<Category>>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    state: Arc<RwLock<State>>,
}

#[derive(Debug, Default)]
struct State {
    categories: BTreeMap<i32, Category>,
    last_id: i32,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self, filter: NameFilter, params: PageParams) -> CategoryResult<PagedList<Category>> {
        let state = self.state.read().await;

        Ok(paginate(
            state.categories.values().cloned(),
            |c| filter.matches(&c.name),
            |a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)),
            params,
        ))
    }

    async fn get_by_id(&self, id: i32) -> CategoryResult<Option<Category>> {
        let state = self.state.read().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let mut state = self.state.write().await;

        state.last_id += 1;
        let category = Category {
            id: state.last_id,
            name: input.name,
            image_url: input.image_url,
        };
        state.categories.insert(category.id, category.clone());

        tracing::info!(category_id = category.id, "Created category");
        Ok(category)
    }

    async fn update(&self, category: Category) -> CategoryResult<Option<Category>> {
        let mut state = self.state.write().await;

        let Some(stored) = state.categories.get_mut(&category.id) else {
            return Ok(None);
        };
        *stored = category.clone();

        tracing::info!(category_id = category.id, "Updated category");
        Ok(Some(category))
    }

    async fn delete(&self, id: i32) -> CategoryResult<Option<Category>> {
        let mut state = self.state.write().await;

        let removed = state.categories.remove(&id);
        if removed.is_some() {
            tracing::info!(category_id = id, "Deleted category");
        }
        Ok(removed)
    }
}

use async_trait::async_trait;
use pagination::{NameFilter, PageParams, PagedList};
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr,
};

use crate::{
    entity,
    error::{CategoryError, CategoryResult},
    models::{Category, CreateCategory},
    repository::CategoryRepository,
};

/// PostgreSQL repository; filtering, ordering and slicing run in SQL
#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(&self, filter: NameFilter, params: PageParams) -> CategoryResult<PagedList<Category>> {
        let mut query = entity::Entity::find();
        if let Some(pattern) = filter.like_pattern() {
            query = query.filter(Expr::col(entity::Column::Name).ilike(pattern));
        }

        let total_count = query.clone().count(&self.db).await?;
        if params.offset() >= total_count {
            return Ok(PagedList::new(vec![], total_count, params));
        }

        let models = query
            .order_by_asc(entity::Column::Name)
            .order_by_asc(entity::Column::Id)
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db)
            .await?;

        Ok(PagedList::new(
            models.into_iter().map(Into::into).collect(),
            total_count,
            params,
        ))
    }

    async fn get_by_id(&self, id: i32) -> CategoryResult<Option<Category>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(category_id = model.id, "Created category");
        Ok(model.into())
    }

    async fn update(&self, category: Category) -> CategoryResult<Option<Category>> {
        let id = category.id;
        let active_model: entity::ActiveModel = category.into();

        match active_model.update(&self.db).await {
            Ok(model) => {
                tracing::info!(category_id = id, "Updated category");
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> CategoryResult<Option<Category>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => CategoryError::InUse(id),
                _ => CategoryError::Database(e),
            })?;

        tracing::info!(category_id = id, "Deleted category");
        Ok(Some(model.into()))
    }
}

use async_trait::async_trait;
use pagination::{PageParams, PagedList};
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, PriceCriterion, Product, ProductFilter},
    repository::ProductRepository,
};

/// PostgreSQL repository; filtering, ordering and slicing run in SQL
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn condition(filter: &ProductFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(pattern) = filter.name.like_pattern() {
        condition = condition.add(Expr::col(entity::Column::Name).ilike(pattern));
    }

    if let Some(price) = filter.price {
        let column = entity::Column::Price;
        condition = condition.add(match price.criterion {
            PriceCriterion::Maior => column.gt(price.value),
            PriceCriterion::Menor => column.lt(price.value),
            PriceCriterion::Igual => column.eq(price.value),
        });
    }

    condition
}

/// Foreign key violations on insert/update mean the category is missing
fn write_error(e: DbErr, category_id: i32) -> ProductError {
    match e.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ProductError::UnknownCategory(category_id),
        _ => ProductError::Database(e),
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self, filter: ProductFilter, params: PageParams) -> ProductResult<PagedList<Product>> {
        let query = entity::Entity::find().filter(condition(&filter));

        let total_count = query.clone().count(&self.db).await?;
        if params.offset() >= total_count {
            return Ok(PagedList::new(vec![], total_count, params));
        }

        let models = query
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

    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_category(&self, category_id: i32) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::CategoryId.eq(category_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let category_id = input.category_id;
        let active_model: entity::ActiveModel = input.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, category_id))?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, product: Product) -> ProductResult<Option<Product>> {
        let (id, category_id) = (product.id, product.category_id);
        let active_model: entity::ActiveModel = product.into();

        match active_model.update(&self.db).await {
            Ok(model) => {
                tracing::info!(product_id = id, "Updated product");
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(write_error(e, category_id)),
        }
    }

    async fn delete(&self, id: i32) -> ProductResult<Option<Product>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        entity::Entity::delete_by_id(id).exec(&self.db).await?;

        tracing::info!(product_id = id, "Deleted product");
        Ok(Some(model.into()))
    }
}

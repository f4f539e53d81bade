use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{CreateProduct, Product};

/// Sea-ORM entity for the `produtos` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "produtos")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "produto_id")]
    pub id: i32,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(column_name = "descricao")]
    pub description: String,
    #[sea_orm(column_name = "preco")]
    pub price: f64,
    #[sea_orm(column_name = "imagem_url")]
    pub image_url: String,
    #[sea_orm(column_name = "estoque")]
    pub stock: f32,
    #[sea_orm(column_name = "data_cadastro")]
    pub registered_at: DateTimeWithTimeZone,
    #[sea_orm(column_name = "categoria_id")]
    pub category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            image_url: model.image_url,
            stock: model.stock,
            registered_at: model.registered_at.into(),
            category_id: model.category_id,
        }
    }
}

impl From<CreateProduct> for ActiveModel {
    fn from(input: CreateProduct) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            image_url: Set(input.image_url),
            stock: Set(input.stock),
            registered_at: Set(chrono::Utc::now().into()),
            category_id: Set(input.category_id),
        }
    }
}

impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            image_url: Set(product.image_url),
            stock: Set(product.stock),
            registered_at: Set(product.registered_at.into()),
            category_id: Set(product.category_id),
        }
    }
}

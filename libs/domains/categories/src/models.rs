use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[serde(rename = "categoriaId")]
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "imagemUrl")]
    pub image_url: String,
}

/// Payload for `POST /categorias`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[serde(rename = "imagemUrl", default)]
    #[validate(length(max = 300))]
    pub image_url: String,
}

/// Payload for `PUT /categorias/{id}`; `categoriaId` must repeat the path id
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[serde(rename = "categoriaId")]
    pub id: i32,
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[serde(rename = "imagemUrl", default)]
    #[validate(length(max = 300))]
    pub image_url: String,
}

impl From<UpdateCategory> for Category {
    fn from(input: UpdateCategory) -> Self {
        Self {
            id: input.id,
            name: input.name,
            image_url: input.image_url,
        }
    }
}

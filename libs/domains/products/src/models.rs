use chrono::{DateTime, Utc};
use pagination::NameFilter;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[serde(rename = "produtoId")]
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "imagemUrl")]
    pub image_url: String,
    #[serde(rename = "estoque")]
    pub stock: f32,
    #[serde(rename = "dataCadastro")]
    pub registered_at: DateTime<Utc>,
    #[serde(rename = "categoriaId")]
    pub category_id: i32,
}

/// Payload for `POST /produtos`; the registration date is set by the server
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[serde(rename = "descricao", default)]
    #[validate(length(max = 300))]
    pub description: String,
    #[serde(rename = "preco")]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(rename = "imagemUrl", default)]
    #[validate(length(max = 300))]
    pub image_url: String,
    #[serde(rename = "estoque", default)]
    #[validate(range(min = 0.0))]
    pub stock: f32,
    #[serde(rename = "categoriaId")]
    #[validate(range(min = 1))]
    pub category_id: i32,
}

/// Payload for `PUT /produtos/{id}`; `produtoId` must repeat the path id.
///
/// Without `dataCadastro` the stored registration date is kept.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[serde(rename = "produtoId")]
    pub id: i32,
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[serde(rename = "descricao", default)]
    #[validate(length(max = 300))]
    pub description: String,
    #[serde(rename = "preco")]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(rename = "imagemUrl", default)]
    #[validate(length(max = 300))]
    pub image_url: String,
    #[serde(rename = "estoque", default)]
    #[validate(range(min = 0.0))]
    pub stock: f32,
    #[serde(rename = "dataCadastro", default)]
    pub registered_at: Option<DateTime<Utc>>,
    #[serde(rename = "categoriaId")]
    #[validate(range(min = 1))]
    pub category_id: i32,
}

impl UpdateProduct {
    /// Apply onto the stored product, keeping its registration date unless given
    pub fn apply_to(self, current: &Product) -> Product {
        Product {
            id: current.id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            stock: self.stock,
            registered_at: self.registered_at.unwrap_or(current.registered_at),
            category_id: self.category_id,
        }
    }
}

/// Payload for `PATCH /produtos/{id}/update-partial`; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchProduct {
    #[serde(rename = "estoque")]
    #[validate(range(min = 1.0, max = 9999.0))]
    pub stock: Option<f32>,
    /// Must fall after today
    #[serde(rename = "dataCadastro")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl PatchProduct {
    pub fn is_empty(&self) -> bool {
        self.stock.is_none() && self.registered_at.is_none()
    }

    /// Rejects a registration date that is not after `now`'s calendar day
    pub fn check_registration_date(&self, now: DateTime<Utc>) -> Result<(), String> {
        match self.registered_at {
            Some(date) if date.date_naive() <= now.date_naive() => Err(format!(
                "dataCadastro must be after {}",
                now.date_naive()
            )),
            _ => Ok(()),
        }
    }

    pub fn apply(self, product: &mut Product) {
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(date) = self.registered_at {
            product.registered_at = date;
        }
    }
}

/// Comparator accepted by `precoCriterio`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PriceCriterion {
    /// Strictly greater than `preco`
    Maior,
    /// Strictly less than `preco`
    Menor,
    /// Equal to `preco`
    Igual,
}

/// Query parameters of the price filter, as received
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceFilter {
    /// Reference price
    #[param(example = 50.0)]
    pub preco: Option<f64>,
    /// `maior`, `menor` or `igual`
    #[serde(rename = "precoCriterio")]
    #[param(example = "maior")]
    pub preco_criterio: Option<String>,
}

impl PriceFilter {
    /// Resolved comparison; an unknown comparator disables the filter
    pub fn condition(&self) -> Option<PriceCondition> {
        let value = self.preco?;
        let raw = self.preco_criterio.as_deref()?.trim();

        match raw.parse::<PriceCriterion>() {
            Ok(criterion) => Some(PriceCondition { criterion, value }),
            Err(_) => {
                tracing::warn!(
                    preco_criterio = raw,
                    "Unknown price comparator, price filter disabled"
                );
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceCondition {
    pub criterion: PriceCriterion,
    pub value: f64,
}

impl PriceCondition {
    pub fn matches(&self, price: f64) -> bool {
        match self.criterion {
            PriceCriterion::Maior => price > self.value,
            PriceCriterion::Menor => price < self.value,
            PriceCriterion::Igual => price == self.value,
        }
    }
}

/// Filter applied by the repository before ordering and paging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name: NameFilter,
    pub price: Option<PriceCondition>,
}

impl ProductFilter {
    pub fn by_name(name: NameFilter) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn by_price(price: Option<PriceCondition>) -> Self {
        Self {
            price,
            ..Self::default()
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.name.matches(&product.name)
            && self.price.is_none_or(|condition| condition.matches(product.price))
    }

    /// Stable key/value form used in cache keys
    pub fn cache_shape(&self) -> [(&'static str, String); 3] {
        let (criterion, value) = match self.price {
            Some(c) => (c.criterion.to_string(), c.value.to_string()),
            None => (String::new(), String::new()),
        };
        [
            ("nome", self.name.term().unwrap_or_default().to_lowercase()),
            ("criterio", criterion),
            ("preco", value),
        ]
    }
}

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use pagination::PaginationError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(i32),

    #[error("No products found")]
    NoProducts,

    #[error("No products found for category {0}")]
    NoProductsInCategory(i32),

    #[error("Path id {path} does not match body produtoId {body}")]
    IdMismatch { path: i32, body: i32 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Category {0} does not exist")]
    UnknownCategory(i32),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            e @ (ProductError::NotFound(_)
            | ProductError::NoProducts
            | ProductError::NoProductsInCategory(_)) => AppError::NotFound(e.to_string()),
            e @ ProductError::IdMismatch { .. } => AppError::BadRequest(e.to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Pagination(e) => AppError::BadRequest(e.to_string()),
            e @ ProductError::UnknownCategory(_) => AppError::UnprocessableEntity(e.to_string()),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ProductError::NotFound(1), StatusCode::NOT_FOUND),
            (ProductError::NoProducts, StatusCode::NOT_FOUND),
            (ProductError::NoProductsInCategory(2), StatusCode::NOT_FOUND),
            (
                ProductError::IdMismatch { path: 1, body: 2 },
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductError::UnknownCategory(99),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ProductError::Database(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}

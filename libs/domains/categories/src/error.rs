use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use pagination::PaginationError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category {0} not found")]
    NotFound(i32),

    #[error("Path id {path} does not match body categoriaId {body}")]
    IdMismatch { path: i32, body: i32 },

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error("Category {0} still has products")]
    InUse(i32),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => AppError::NotFound(format!("Category {} not found", id)),
            e @ CategoryError::IdMismatch { .. } => AppError::BadRequest(e.to_string()),
            CategoryError::Pagination(e) => AppError::BadRequest(e.to_string()),
            e @ CategoryError::InUse(_) => AppError::Conflict(e.to_string()),
            CategoryError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

use axum::{
    Json,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{PagedList, X_PAGINATION};

/// Renders a [`PagedList`] as a JSON array body with an `X-Pagination` header
#[derive(Debug, Clone)]
pub struct PaginatedJson<T>(pub PagedList<T>);

impl<T> From<PagedList<T>> for PaginatedJson<T> {
    fn from(page: PagedList<T>) -> Self {
        Self(page)
    }
}

impl<T: Serialize> IntoResponse for PaginatedJson<T> {
    fn into_response(self) -> Response {
        let metadata = self.0.metadata();
        let header = match serde_json::to_string(&metadata)
            .ok()
            .and_then(|json| HeaderValue::from_str(&json).ok())
        {
            Some(value) => value,
            None => {
                tracing::error!(?metadata, "Failed to encode pagination header");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        let mut response = Json(self.0.items).into_response();
        response.headers_mut().insert(X_PAGINATION, header);
        response
    }
}

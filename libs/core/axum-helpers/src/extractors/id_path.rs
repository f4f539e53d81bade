use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Positive integer identifier taken from the single path parameter.
///
/// `0`, negatives and non-numeric segments are rejected with `INVALID_ID`.
///
/// ```ignore
/// async fn get_category(IdPath(id): IdPath) -> String {
///     format!("category {id}")
/// }
///
/// let app = Router::new().route("/categorias/{id}", get(get_category));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Ok(IdPath(id)),
            _ => Err(AppError::InvalidId(format!(
                "'{raw}' is not a valid identifier"
            ))),
        }
    }
}

//! Stable error identifiers shared by every endpoint.
//!
//! Each code has a string form for clients, an integer for dashboards and a
//! default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidId;
//! assert_eq!(code.as_str(), "INVALID_ID");
//! assert_eq!(code.code(), 1002);
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000s)
    ValidationError,
    /// Path identifier is not a positive integer
    InvalidId,
    InvalidJson,
    /// Malformed query string
    InvalidQuery,
    BadRequest,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    UnprocessableEntity,
    RateLimited,
    UnsupportedApiVersion,
    MethodNotAllowed,

    // Server errors (1500s)
    InternalError,
    ServiceUnavailable,

    // Database errors (2000s)
    DatabaseError,
    DatabaseNotFound,
    DatabaseUnavailable,

    // Serialization (5000s)
    SerdeJsonError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::RateLimited => "RATE_LIMITED",
            Self::UnsupportedApiVersion => "UNSUPPORTED_API_VERSION",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseNotFound => "DATABASE_NOT_FOUND",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    pub const fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::InvalidJson => 1003,
            Self::InvalidQuery => 1004,
            Self::BadRequest => 1005,
            Self::NotFound => 1006,
            Self::Unauthorized => 1007,
            Self::Forbidden => 1008,
            Self::Conflict => 1009,
            Self::UnprocessableEntity => 1010,
            Self::RateLimited => 1011,
            Self::UnsupportedApiVersion => 1012,
            Self::MethodNotAllowed => 1013,
            Self::InternalError => 1500,
            Self::ServiceUnavailable => 1503,
            Self::DatabaseError => 2001,
            Self::DatabaseNotFound => 2002,
            Self::DatabaseUnavailable => 2003,
            Self::SerdeJsonError => 5001,
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError
            | Self::InvalidId
            | Self::InvalidJson
            | Self::InvalidQuery
            | Self::BadRequest
            | Self::UnsupportedApiVersion => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::DatabaseNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Conflict => StatusCode::CONFLICT,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::ServiceUnavailable | Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError | Self::DatabaseError | Self::SerdeJsonError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidId => "Identifier must be a positive integer",
            Self::InvalidJson => "Invalid JSON format",
            Self::InvalidQuery => "Invalid query string",
            Self::BadRequest => "Bad request",
            Self::NotFound => "The requested resource was not found",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Access forbidden",
            Self::Conflict => "Resource already exists",
            Self::UnprocessableEntity => "Request could not be processed",
            Self::RateLimited => "Too many requests, try again later",
            Self::UnsupportedApiVersion => "The requested API version is not supported",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An unexpected error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "A database error occurred",
            Self::DatabaseNotFound => "Database record not found",
            Self::DatabaseUnavailable => "Database is temporarily unavailable",
            Self::SerdeJsonError => "Failed to process JSON data",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 19] = [
        ErrorCode::ValidationError,
        ErrorCode::InvalidId,
        ErrorCode::InvalidJson,
        ErrorCode::InvalidQuery,
        ErrorCode::BadRequest,
        ErrorCode::NotFound,
        ErrorCode::Unauthorized,
        ErrorCode::Forbidden,
        ErrorCode::Conflict,
        ErrorCode::UnprocessableEntity,
        ErrorCode::RateLimited,
        ErrorCode::UnsupportedApiVersion,
        ErrorCode::MethodNotAllowed,
        ErrorCode::InternalError,
        ErrorCode::ServiceUnavailable,
        ErrorCode::DatabaseError,
        ErrorCode::DatabaseNotFound,
        ErrorCode::DatabaseUnavailable,
        ErrorCode::SerdeJsonError,
    ];

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<i32> = ALL.iter().map(ErrorCode::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ALL.len());
    }

    #[test]
    fn test_as_str_matches_serde() {
        for code in ALL {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::json!(code.as_str()));
        }
    }

    #[test]
    fn test_client_errors_use_4xx() {
        assert_eq!(ErrorCode::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ErrorCode::UnprocessableEntity.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}

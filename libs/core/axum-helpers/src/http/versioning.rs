use axum::{
    extract::{FromRequestParts, Query, Request},
    http::{HeaderName, HeaderValue, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

pub const API_VERSION_QUERY: &str = "api-version";
pub const API_VERSION_HEADER: HeaderName = HeaderName::from_static("x-api-version");
pub const SUPPORTED_VERSIONS_HEADER: HeaderName =
    HeaderName::from_static("api-supported-versions");

/// API version negotiated for a request; `1.0` unless the caller asks otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    #[default]
    V1,
    V2,
}

impl ApiVersion {
    pub const SUPPORTED: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "1.0",
            Self::V2 => "2.0",
        }
    }

    fn supported_header() -> HeaderValue {
        HeaderValue::from_static("1.0, 2.0")
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1.0" => Ok(Self::V1),
            "2" | "2.0" => Ok(Self::V2),
            other => Err(AppError::UnsupportedApiVersion(format!(
                "'{other}' is not supported, use one of: 1.0, 2.0"
            ))),
        }
    }
}

/// Version resolved by [`api_version_middleware`], or the default when it did not run
impl<S> FromRequestParts<S> for ApiVersion
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<ApiVersion>().copied().unwrap_or_default())
    }
}

fn requested_version(request: &Request) -> Option<String> {
    let from_query = Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(mut params)| params.remove(API_VERSION_QUERY));

    from_query.or_else(|| {
        request
            .headers()
            .get(API_VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    })
}

/// Resolve the version from `?api-version=` or `x-api-version`.
///
/// Unsupported versions get 400; every response reports the supported set.
pub async fn api_version_middleware(mut request: Request, next: Next) -> Response {
    let version = match requested_version(&request).map(|raw| raw.parse::<ApiVersion>()) {
        None => ApiVersion::default(),
        Some(Ok(version)) => version,
        Some(Err(e)) => return with_supported_versions(e.into_response()),
    };

    request.extensions_mut().insert(version);
    with_supported_versions(next.run(request).await)
}

fn with_supported_versions(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(SUPPORTED_VERSIONS_HEADER, ApiVersion::supported_header());
    response
}

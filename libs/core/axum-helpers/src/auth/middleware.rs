use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use super::jwt::{JwtAuth, JwtClaims};
use crate::errors::AppError;

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Attaches [`JwtClaims`] to the request when a valid bearer token is present.
///
/// Never rejects; anonymous and invalid callers continue without claims.
pub async fn optional_jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(request.headers()) {
        match auth.verify_token(token) {
            Ok(claims) => {
                request.extensions_mut().insert(claims);
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring invalid bearer token"),
        }
    }

    next.run(request).await
}

/// State for [`require_role`]
#[derive(Clone)]
pub struct RoleGuard {
    auth: JwtAuth,
    role: &'static str,
}

impl RoleGuard {
    pub fn new(auth: JwtAuth, role: &'static str) -> Self {
        Self { auth, role }
    }
}

/// Rejects with 401 without a valid token and 403 without the guard's role.
pub async fn require_role(
    State(guard): State<RoleGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let attached = request.extensions().get::<JwtClaims>().cloned();
    let claims = match attached {
        Some(claims) => claims,
        None => {
            let token = bearer_token(request.headers())
                .ok_or_else(|| AppError::Unauthorized("Bearer token required".to_string()))?;
            let claims = guard.auth.verify_token(token).map_err(|e| {
                tracing::debug!(error = %e, "Bearer token rejected");
                AppError::Unauthorized("Invalid or expired token".to_string())
            })?;
            request.extensions_mut().insert(claims.clone());
            claims
        }
    };

    if !claims.has_role(guard.role) {
        tracing::info!(sub = %claims.sub, role = guard.role, "Missing required role");
        return Err(AppError::Forbidden(format!(
            "Role '{}' is required",
            guard.role
        )));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{
        Extension, Router, body::Body, http::Request as HttpRequest, http::StatusCode,
        middleware::from_fn_with_state, routing::get,
    };
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("catalog-test-secret-with-32-chars!!").unwrap())
    }

    async fn whoami(Extension(claims): Extension<JwtClaims>) -> String {
        claims.name
    }

    fn app() -> Router {
        Router::new()
            .route("/todos", get(whoami))
            .layer(from_fn_with_state(RoleGuard::new(auth(), "User"), require_role))
    }

    async fn call(token: Option<String>) -> StatusCode {
        let mut request = HttpRequest::builder().uri("/todos");
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        assert_eq!(call(None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        assert_eq!(call(Some("garbage".into())).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden() {
        let token = auth().create_access_token("1", "ana", &["Admin"]).unwrap();
        assert_eq!(call(Some(token)).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_user_role_passes() {
        let token = auth().create_access_token("1", "ana", &["User"]).unwrap();
        assert_eq!(call(Some(token)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_optional_middleware_attaches_claims() {
        async fn name(claims: Option<Extension<JwtClaims>>) -> String {
            claims.map(|Extension(c)| c.name).unwrap_or_default()
        }

        let app = Router::new()
            .route("/", get(name))
            .layer(from_fn_with_state(auth(), optional_jwt_auth_middleware));
        let token = auth().create_access_token("1", "ana", &[]).unwrap();

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

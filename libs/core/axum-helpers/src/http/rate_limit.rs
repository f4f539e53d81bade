use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::{ConfigError, FromEnv, env_parse};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter, clock::Clock};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::auth::JwtClaims;
use crate::errors::AppError;

/// Requests allowed per partition within a window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub permits: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            permits: 5,
            window: Duration::from_secs(10),
        }
    }
}

impl FromEnv for RateLimitConfig {
    /// - RATE_LIMIT_PERMITS: defaults to 5
    /// - RATE_LIMIT_WINDOW_SECS: defaults to 10
    fn from_env() -> Result<Self, ConfigError> {
        let permits: u32 = env_parse("RATE_LIMIT_PERMITS", 5)?;
        let window_secs: u64 = env_parse("RATE_LIMIT_WINDOW_SECS", 10)?;

        if permits == 0 || window_secs == 0 {
            return Err(ConfigError::ParseError {
                key: if permits == 0 {
                    "RATE_LIMIT_PERMITS"
                } else {
                    "RATE_LIMIT_WINDOW_SECS"
                }
                .to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            permits,
            window: Duration::from_secs(window_secs),
        })
    }
}

/// Keyed limiter shared by every request.
///
/// Each partition may burst `permits` requests, then regains one permit every
/// `window / permits`.
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
}

impl RateLimit {
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.permits).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(config.window / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    /// `Err` carries how long the partition must wait
    pub fn check(&self, partition: &str) -> Result<(), Duration> {
        self.limiter
            .check_key(&partition.to_string())
            .map_err(|not_until| not_until.wait_time_from(self.limiter.clock().now()))
    }

    /// Drop partitions that are back to a full bucket
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    /// Number of partitions currently tracked
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }

    /// Run [`Self::retain_recent`] every `every` until `shutdown` fires.
    ///
    /// Without it the keyed state grows with every distinct host or user seen.
    pub fn spawn_cleanup(&self, every: Duration, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        let limit = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let before = limit.len();
                        limit.retain_recent();
                        tracing::debug!(before, after = limit.len(), "Pruned rate limit partitions");
                    }
                    _ = shutdown.recv() => {
                        tracing::debug!("Rate limit cleanup stopped");
                        break;
                    }
                }
            }
        })
    }
}

/// Authenticated callers are limited by name, anonymous ones by `Host`
fn partition_key(request: &Request) -> String {
    if let Some(claims) = request.extensions().get::<JwtClaims>() {
        return format!("user:{}", claims.name);
    }

    request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|host| format!("host:{host}"))
        .unwrap_or_else(|| "anonymous".to_string())
}

pub async fn rate_limit_middleware(
    State(limit): State<RateLimit>,
    request: Request,
    next: Next,
) -> Response {
    let partition = partition_key(&request);

    match limit.check(&partition) {
        Ok(()) => next.run(request).await,
        Err(wait) => {
            let retry_after = wait.as_secs().max(1);
            tracing::warn!(%partition, retry_after, "Rate limit exceeded");

            let mut response = AppError::TooManyRequests(format!(
                "Too many requests, retry in {retry_after}s"
            ))
            .into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    fn app(limit: RateLimit) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(limit, rate_limit_middleware))
    }

    async fn hit(app: &Router, host: &str) -> Response {
        app.clone()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .header("host", host)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_sixth_request_in_window_is_rejected() {
        let app = app(RateLimit::new(RateLimitConfig::default()));

        for _ in 0..5 {
            assert_eq!(hit(&app, "catalog.local").await.status(), StatusCode::OK);
        }

        let rejected = hit(&app, "catalog.local").await;
        assert_eq!(rejected.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(rejected.headers().contains_key("retry-after"));
    }

    #[tokio::test]
    async fn test_partitions_are_independent() {
        let app = app(RateLimit::new(RateLimitConfig {
            permits: 1,
            window: Duration::from_secs(60),
        }));

        assert_eq!(hit(&app, "a.local").await.status(), StatusCode::OK);
        assert_eq!(hit(&app, "a.local").await.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(hit(&app, "b.local").await.status(), StatusCode::OK);
    }

    fn short_window() -> RateLimit {
        RateLimit::new(RateLimitConfig {
            permits: 1,
            window: Duration::from_millis(50),
        })
    }

    #[tokio::test]
    async fn test_retain_recent_drops_stale_partitions() {
        let limit = short_window();
        assert!(limit.check("host:a.local").is_ok());
        assert!(limit.check("host:b.local").is_ok());
        assert_eq!(limit.len(), 2);

        tokio::time::sleep(Duration::from_millis(150)).await;
        limit.retain_recent();

        assert!(limit.is_empty());
    }

    #[test]
    fn test_retain_recent_keeps_limited_partitions() {
        let limit = RateLimit::new(RateLimitConfig {
            permits: 1,
            window: Duration::from_secs(60),
        });
        assert!(limit.check("host:a.local").is_ok());

        limit.retain_recent();

        assert_eq!(limit.len(), 1);
        assert!(limit.check("host:a.local").is_err());
    }

    #[tokio::test]
    async fn test_cleanup_task_prunes_and_stops_on_shutdown() {
        let limit = short_window();
        let coordinator = crate::server::ShutdownCoordinator::new();
        assert!(limit.check("host:a.local").is_ok());

        let handle = limit.spawn_cleanup(Duration::from_millis(20), coordinator.subscribe());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(limit.is_empty());

        coordinator.shutdown();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("cleanup task did not stop")
            .unwrap();
    }

    #[test]
    fn test_claims_take_precedence_over_host() {
        let mut request = axum::http::Request::builder()
            .header("host", "catalog.local")
            .body(Body::empty())
            .unwrap();
        assert_eq!(partition_key(&request), "host:catalog.local");

        request.extensions_mut().insert(JwtClaims {
            sub: "7".into(),
            name: "joana".into(),
            roles: vec![],
            exp: 0,
            iat: 0,
            jti: "x".into(),
        });
        assert_eq!(partition_key(&request), "user:joana");
    }

    #[test]
    fn test_config_rejects_zero_permits() {
        temp_env::with_var("RATE_LIMIT_PERMITS", Some("0"), || {
            assert!(RateLimitConfig::from_env().is_err());
        });
    }
}

//! Per-client request quota keyed by client IP and request path.

use crate::errors::{AppError, ErrorCode};
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    middleware::StateInformationMiddleware,
    state::keyed::DefaultKeyedStateStore,
};
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::{Arc, Weak};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

type ClientKey = (String, String);
type KeyedLimiter = RateLimiter<
    ClientKey,
    DefaultKeyedStateStore<ClientKey>,
    DefaultClock,
    StateInformationMiddleware,
>;

/// Quota state after an admitted request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allowance {
    /// Requests the client may still make right now.
    pub remaining: u32,
    /// Time until the client's quota is fully replenished.
    pub reset_after: Duration,
}

/// Shared keyed limiter. Clones share the same buckets.
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<KeyedLimiter>,
    quota: Quota,
}

impl RateLimit {
    pub fn per_minute(per_minute: NonZeroU32) -> Self {
        let quota = Quota::per_minute(per_minute);
        Self {
            limiter: Arc::new(
                RateLimiter::keyed(quota).with_middleware::<StateInformationMiddleware>(),
            ),
            quota,
        }
    }

    pub fn limit(&self) -> NonZeroU32 {
        self.quota.burst_size()
    }

    /// Consume one cell for `(ip, path)`. On rejection returns how long the
    /// client has to wait.
    pub fn check(&self, ip: &str, path: &str) -> Result<Allowance, Duration> {
        let key = (ip.to_string(), path.to_string());
        match self.limiter.check_key(&key) {
            Ok(snapshot) => {
                let remaining = snapshot.remaining_burst_capacity();
                let spent = self.limit().get().saturating_sub(remaining);
                Ok(Allowance {
                    remaining,
                    reset_after: self.quota.replenish_interval() * spent,
                })
            }
            Err(not_until) => Err(not_until.wait_time_from(self.limiter.clock().now())),
        }
    }

    /// Periodically drop buckets that are back to full capacity.
    ///
    /// The task holds only a weak reference and exits once every clone of
    /// this `RateLimit` is dropped.
    pub fn spawn_eviction(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let limiter: Weak<KeyedLimiter> = Arc::downgrade(&self.limiter);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(limiter) = limiter.upgrade() else {
                    debug!("Rate limiter dropped, stopping bucket eviction");
                    break;
                };
                limiter.retain_recent();
                limiter.shrink_to_fit();
                debug!(tracked_clients = limiter.len(), "Rate limiter buckets pruned");
            }
        })
    }
}

/// Client address: first `X-Forwarded-For` hop, then `X-Real-IP`, then the
/// socket peer, else `unknown`.
pub fn client_ip(request: &Request) -> String {
    let headers = request.headers();

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next());
    let real_ip = headers.get("x-real-ip").and_then(|v| v.to_str().ok());

    if let Some(ip) = forwarded.or(real_ip).map(str::trim).filter(|ip| !ip.is_empty()) {
        return ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware rejecting requests over quota with `429 too_many_requests`.
///
/// ```ignore
/// let limit = RateLimit::per_minute(NonZeroU32::new(100).unwrap());
/// let app = Router::new().layer(middleware::from_fn_with_state(limit, rate_limit));
/// ```
pub async fn rate_limit(State(limit): State<RateLimit>, request: Request, next: Next) -> Response {
    let ip = client_ip(&request);
    let path = request.uri().path().to_string();

    match limit.check(&ip, &path) {
        Ok(allowance) => {
            let mut response = next.run(request).await;
            insert_quota_headers(
                response.headers_mut(),
                limit.limit(),
                allowance.remaining,
                allowance.reset_after,
            );
            response
        }
        Err(wait) => {
            let retry_after = wait.as_secs_f64().ceil().max(1.0) as u64;
            let mut response = AppError::new("rate limit exceeded", ErrorCode::TooManyRequests)
                .with_context("client_ip", ip)
                .with_context("path", path)
                .with_context("retry_after_secs", retry_after)
                .into_response();
            let headers = response.headers_mut();
            insert_quota_headers(headers, limit.limit(), 0, wait);
            headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    }
}

/// `X-RateLimit-Reset` is the unix time, in whole seconds, at which the
/// quota is replenished.
fn insert_quota_headers(
    headers: &mut HeaderMap,
    limit: NonZeroU32,
    remaining: u32,
    reset_after: Duration,
) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let reset_at = (now + reset_after).as_secs_f64().ceil() as u64;

    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(limit.get()));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(remaining));
    headers.insert(X_RATELIMIT_RESET, HeaderValue::from(reset_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use tower::ServiceExt;

    fn app(per_minute: u32) -> Router {
        let limit = RateLimit::per_minute(NonZeroU32::new(per_minute).unwrap());
        Router::new()
            .route("/a", get(|| async { "a" }))
            .route("/b", get(|| async { "b" }))
            .layer(middleware::from_fn_with_state(limit, rate_limit))
    }

    fn request(path: &str, ip: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_requests_within_quota_carry_limit_header() {
        let response = app(5).oneshot(request("/a", "10.0.0.1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-ratelimit-limit"], "5");
    }

    #[tokio::test]
    async fn test_exhausted_quota_is_rejected_with_retry_after() {
        let app = app(1);

        let first = app.clone().oneshot(request("/a", "10.0.0.1")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app.oneshot(request("/a", "10.0.0.1")).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(second.headers()["x-ratelimit-limit"], "1");
        let retry_after: u64 = second.headers()["retry-after"]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(retry_after >= 1);
    }

    fn header_u64(response: &Response, name: &str) -> u64 {
        response.headers()[name].to_str().unwrap().parse().unwrap()
    }

    fn unix_now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[tokio::test]
    async fn test_remaining_counts_down_and_reset_is_in_the_future() {
        let app = app(3);

        let first = app.clone().oneshot(request("/a", "10.0.0.1")).await.unwrap();
        assert_eq!(first.headers()["x-ratelimit-remaining"], "2");
        assert!(header_u64(&first, "x-ratelimit-reset") >= unix_now());

        let second = app.oneshot(request("/a", "10.0.0.1")).await.unwrap();
        assert_eq!(second.headers()["x-ratelimit-remaining"], "1");
        assert!(
            header_u64(&second, "x-ratelimit-reset") >= header_u64(&first, "x-ratelimit-reset")
        );
    }

    #[tokio::test]
    async fn test_rejection_reports_zero_remaining() {
        let app = app(1);
        app.clone().oneshot(request("/a", "10.0.0.1")).await.unwrap();

        let rejected = app.oneshot(request("/a", "10.0.0.1")).await.unwrap();
        assert_eq!(rejected.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(rejected.headers()["x-ratelimit-remaining"], "0");
        assert!(header_u64(&rejected, "x-ratelimit-reset") > unix_now());
    }

    #[test]
    fn test_check_reports_allowance() {
        let limit = RateLimit::per_minute(NonZeroU32::new(2).unwrap());

        let allowance = limit.check("10.0.0.1", "/a").unwrap();
        assert_eq!(allowance.remaining, 1);
        assert_eq!(allowance.reset_after, Duration::from_secs(30));

        assert_eq!(limit.check("10.0.0.1", "/a").unwrap().remaining, 0);
        assert!(limit.check("10.0.0.1", "/a").is_err());
    }

    #[tokio::test]
    async fn test_eviction_runs_while_limiter_is_alive() {
        let limit = RateLimit::per_minute(NonZeroU32::new(1).unwrap());
        let eviction = limit.spawn_eviction(Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!eviction.is_finished());
        eviction.abort();
    }

    #[tokio::test]
    async fn test_eviction_stops_when_limiter_is_dropped() {
        let limit = RateLimit::per_minute(NonZeroU32::new(1).unwrap());
        let clone = limit.clone();
        let eviction = limit.spawn_eviction(Duration::from_millis(10));

        drop(limit);
        drop(clone);

        tokio::time::timeout(Duration::from_secs(1), eviction)
            .await
            .expect("eviction task should exit once the limiter is gone")
            .unwrap();
    }

    #[tokio::test]
    async fn test_quota_is_tracked_per_ip_and_path() {
        let app = app(1);

        for (path, ip) in [("/a", "10.0.0.1"), ("/b", "10.0.0.1"), ("/a", "10.0.0.2")] {
            let response = app.clone().oneshot(request(path, ip)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path} from {ip}");
        }
    }

    #[test]
    fn test_client_ip_resolution_order() {
        let forwarded = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("x-real-ip", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&forwarded), "203.0.113.7");

        let real_ip = Request::builder()
            .header("x-real-ip", "198.51.100.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&real_ip), "198.51.100.2");

        let mut peer = Request::builder().body(Body::empty()).unwrap();
        peer.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4000))));
        assert_eq!(client_ip(&peer), "192.0.2.1");

        let bare = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&bare), "unknown");
    }
}

use crate::RpcState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Rate limiter middleware
#[derive(Clone)]
pub struct RateLimitLayer {
    pub limiter: SharedRateLimiter,
}

impl RateLimitLayer {
    /// Create a new rate limiter with requests per second
    pub fn new(requests_per_second: u32) -> Self {
        let quota = Quota::per_second(std::num::NonZeroU32::new(requests_per_second.max(1)).unwrap());
        let limiter = Arc::new(RateLimiter::direct(quota));
        Self { limiter }
    }

    /// Create a new rate limiter with custom duration
    pub fn new_with_duration(requests: u32, duration: Duration) -> Self {
        let quota = Quota::with_period(duration)
            .unwrap()
            .allow_burst(std::num::NonZeroU32::new(requests.max(1)).unwrap());
        let limiter = Arc::new(RateLimiter::direct(quota));
        Self { limiter }
    }
}

/// Rate limiting middleware handler
pub async fn rate_limit_middleware(
    limiter: SharedRateLimiter,
    request: Request,
    next: Next,
) -> Response {
    match limiter.check() {
        Ok(_) => next.run(request).await,
        Err(_) => (
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded. Please try again later.",
        )
            .into_response(),
    }
}

/// Request timeout middleware
pub async fn timeout_middleware(request: Request, next: Next) -> Result<Response, StatusCode> {
    let timeout_duration = Duration::from_secs(30);

    match tokio::time::timeout(timeout_duration, next.run(request)).await {
        Ok(response) => Ok(response),
        Err(_) => Err(StatusCode::REQUEST_TIMEOUT),
    }
}

/// Request duration tracking middleware
pub async fn track_metrics(
    State(state): State<RpcState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(metrics) = state.metrics.clone() else {
        return next.run(request).await;
    };

    let endpoint = request.uri().path().to_string();
    let method = request.method().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    metrics.observe_request(&endpoint, method.as_str(), start.elapsed().as_secs_f64());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limiter() {
        let limiter = RateLimitLayer::new(2); // 2 requests per second

        // First two requests should succeed
        assert!(limiter.limiter.check().is_ok());
        assert!(limiter.limiter.check().is_ok());

        // Third should be rate limited
        assert!(limiter.limiter.check().is_err());

        // Wait and try again
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(limiter.limiter.check().is_ok());
    }
}

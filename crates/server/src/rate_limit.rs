use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Sliding-window request budget, one bucket per client key.
///
/// Clones share the same buckets, so the state can be layered onto a router
/// and still hand copies to tests.
#[derive(Clone)]
pub struct RateLimitState {
    inner: Arc<Mutex<Buckets>>,
}

struct Buckets {
    /// Hit timestamps per client, oldest first.
    by_client: HashMap<String, VecDeque<Instant>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimitState {
    /// Budget of `max_requests` per `window` for each distinct client.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Buckets {
                by_client: HashMap::new(),
                max_requests,
                window,
            })),
        }
    }

    /// Record a hit for `key` if its budget allows one.
    fn check(&self, key: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let cutoff = Instant::now() - inner.window;
        let max = inner.max_requests as usize;

        let hits = inner.by_client.entry(key.to_string()).or_default();

        // Timestamps arrive in order, so the expired ones form a prefix.
        while hits.front().is_some_and(|t| *t <= cutoff) {
            hits.pop_front();
        }

        if hits.len() >= max {
            return false;
        }
        hits.push_back(Instant::now());
        true
    }
}

/// Derive a per-client key from proxy headers.
///
/// Takes the first hop of `X-Forwarded-For`, then `X-Real-IP`. Clients
/// reaching us without either header share the `"unknown"` bucket.
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .headers()
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Axum middleware enforcing the per-client budget on the REST API.
pub async fn rate_limit_middleware(
    axum::extract::State(state): axum::extract::State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    if !state.check(&key) {
        let body = serde_json::json!({
            "kind": "RateLimited",
            "message": "Too many requests. Slow down and retry shortly."
        });
        return (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_headers(headers: &[(&str, &str)]) -> Request {
        let mut builder = axum::http::Request::builder().uri("/api/properties");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn forwarded_for_first_hop_wins() {
        let req = request_with_headers(&[
            ("x-forwarded-for", "203.0.113.9, 10.0.0.2"),
            ("x-real-ip", "10.0.0.2"),
        ]);
        assert_eq!(client_key(&req), "203.0.113.9");
    }

    #[test]
    fn real_ip_is_the_fallback() {
        let req = request_with_headers(&[("x-real-ip", "198.51.100.4")]);
        assert_eq!(client_key(&req), "198.51.100.4");
    }

    #[test]
    fn bare_request_shares_the_unknown_bucket() {
        let req = request_with_headers(&[]);
        assert_eq!(client_key(&req), "unknown");
    }

    #[test]
    fn requests_over_the_limit_are_rejected() {
        let state = RateLimitState::new(3, Duration::from_secs(60));
        assert!(state.check("203.0.113.9"));
        assert!(state.check("203.0.113.9"));
        assert!(state.check("203.0.113.9"));
        assert!(!state.check("203.0.113.9"));
    }

    #[test]
    fn clients_are_limited_independently() {
        let state = RateLimitState::new(1, Duration::from_secs(60));
        assert!(state.check("203.0.113.9"));
        assert!(!state.check("203.0.113.9"));
        assert!(state.check("198.51.100.4"));
    }

    #[test]
    fn window_expiry_frees_the_budget() {
        let state = RateLimitState::new(1, Duration::from_millis(20));
        assert!(state.check("203.0.113.9"));
        assert!(!state.check("203.0.113.9"));
        std::thread::sleep(Duration::from_millis(60));
        assert!(state.check("203.0.113.9"));
    }
}

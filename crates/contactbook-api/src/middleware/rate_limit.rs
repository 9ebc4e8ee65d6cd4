//! Token bucket rate limiter middleware.
//!
//! Buckets are keyed by client identity and route, so each endpoint has its
//! own allowance per client.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use contactbook_core::config::{RateLimitConfig, RateLimitRule};

use crate::error::ApiError;
use crate::state::AppState;

/// In-memory token bucket rate limiter for one policy.
///
/// Buckets that have refilled completely are dropped on the next sweep, so
/// the map only holds clients seen within the last window.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    state: Arc<Mutex<Buckets>>,
    /// Maximum tokens per bucket.
    max_tokens: f64,
    /// Token refill rate per second.
    refill_rate: f64,
    /// Time for an empty bucket to refill completely.
    window: Duration,
}

#[derive(Debug)]
struct Buckets {
    /// client + route → bucket state.
    entries: HashMap<String, TokenBucket>,
    last_sweep: Instant,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn refilled(&self, now: Instant, rate: f64, max: f64) -> f64 {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        (self.tokens + elapsed * rate).min(max)
    }
}

impl RateLimiter {
    /// `rule.times` requests per `rule.seconds`, refilled continuously.
    pub fn new(rule: RateLimitRule) -> Self {
        let max_tokens = f64::from(rule.times.max(1));
        let window = Duration::from_secs(rule.seconds.max(1));
        Self {
            state: Arc::new(Mutex::new(Buckets {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            })),
            max_tokens,
            refill_rate: max_tokens / window.as_secs_f64(),
            window,
        }
    }

    /// Consume a token for `key`, or return the seconds until one is free.
    pub async fn check(&self, key: &str) -> Result<(), u64> {
        self.check_at(key, Instant::now()).await
    }

    async fn check_at(&self, key: &str, now: Instant) -> Result<(), u64> {
        let mut state = self.state.lock().await;

        if now.saturating_duration_since(state.last_sweep) >= self.window {
            self.sweep(&mut state.entries, now);
            state.last_sweep = now;
        }

        let bucket = state.entries.entry(key.to_string()).or_insert(TokenBucket {
            tokens: self.max_tokens,
            last_refill: now,
        });

        bucket.tokens = bucket.refilled(now, self.refill_rate, self.max_tokens);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            // absorb float error before rounding up
            let wait = (1.0 - bucket.tokens) / self.refill_rate - 1e-6;
            Err(wait.ceil().max(1.0) as u64)
        }
    }

    /// Drop buckets that are back to full; a fresh bucket is equivalent.
    fn sweep(&self, entries: &mut HashMap<String, TokenBucket>, now: Instant) {
        let before = entries.len();
        entries
            .retain(|_, b| b.refilled(now, self.refill_rate, self.max_tokens) < self.max_tokens);
        let evicted = before - entries.len();
        if evicted > 0 {
            debug!(evicted, remaining = entries.len(), "Evicted idle rate limit buckets");
        }
    }

    #[cfg(test)]
    async fn bucket_count(&self) -> usize {
        self.state.lock().await.entries.len()
    }
}

/// The three contact route policies.
#[derive(Debug, Clone)]
pub struct RateLimits {
    enabled: bool,
    pub reads: RateLimiter,
    pub writes: RateLimiter,
    pub lookups: RateLimiter,
}

impl RateLimits {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            reads: RateLimiter::new(config.reads),
            writes: RateLimiter::new(config.writes),
            lookups: RateLimiter::new(config.lookups),
        }
    }
}

/// First `X-Forwarded-For` address, else the peer address.
fn client_identity(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn enforce(
    enabled: bool,
    limiter: &RateLimiter,
    request: Request,
    next: Next,
) -> Response {
    if !enabled {
        return next.run(request).await;
    }

    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let client = client_identity(&request);
    let key = format!("{client}|{}|{route}", request.method());

    match limiter.check(&key).await {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            warn!(%client, %route, retry_after, "Rate limit exceeded");
            ApiError::rate_limited(retry_after).into_response()
        }
    }
}

/// Policy for listing and fetching contacts.
pub async fn limit_reads(State(state): State<AppState>, request: Request, next: Next) -> Response {
    enforce(state.rate_limits.enabled, &state.rate_limits.reads, request, next).await
}

/// Policy for contact mutations.
pub async fn limit_writes(State(state): State<AppState>, request: Request, next: Next) -> Response {
    enforce(state.rate_limits.enabled, &state.rate_limits.writes, request, next).await
}

/// Policy for search and birthday queries.
pub async fn limit_lookups(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    enforce(state.rate_limits.enabled, &state.rate_limits.lookups, request, next).await
}

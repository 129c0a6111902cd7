//! Admission control — pluggable per-client request rate limiting.
//!
//! The scorer and the LLM handlers never see this; handlers gate on it before
//! doing any work. Two backends: an in-process map (single-instance deploys)
//! and a shared Redis counter (multi-process deploys).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::http::HeaderMap;
use tokio::sync::Mutex;
use tracing::warn;

use crate::errors::AppError;

/// Rolling-window rate limiter keyed by client identifier.
///
/// Carried in `AppState` as `Arc<dyn RateLimiter>`.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Returns true if the request identified by `key` is admitted under a
    /// budget of `max_requests` per window.
    async fn allow(&self, key: &str, max_requests: u32) -> Result<bool, AppError>;
}

/// Derives the client identifier from request headers: first entry of
/// `x-forwarded-for`, falling back to a shared "unknown" bucket.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// In-process limiter: a mutex-guarded map of per-key rolling windows.
/// Counts are not shared across instances.
pub struct InMemoryLimiter {
    window: Duration,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl InMemoryLimiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryLimiter {
    async fn allow(&self, key: &str, max_requests: u32) -> Result<bool, AppError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        match entries.get_mut(key) {
            Some(entry) if now <= entry.reset_at => {
                if entry.count >= max_requests {
                    return Ok(false);
                }
                entry.count += 1;
                Ok(true)
            }
            _ => {
                entries.insert(
                    key.to_string(),
                    WindowEntry {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                Ok(true)
            }
        }
    }
}

/// Shared-counter limiter backed by Redis INCR + EXPIRE, for deployments with
/// more than one API process.
pub struct RedisLimiter {
    client: redis::Client,
    window_secs: u64,
}

impl RedisLimiter {
    pub fn new(client: redis::Client, window_secs: u64) -> Self {
        Self {
            client,
            window_secs,
        }
    }

    async fn count(&self, key: &str) -> Result<u32, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let redis_key = format!("ratelimit:{key}");

        let count: u32 = redis::cmd("INCR")
            .arg(&redis_key)
            .query_async(&mut conn)
            .await?;

        if count == 1 {
            let _: () = redis::cmd("EXPIRE")
                .arg(&redis_key)
                .arg(self.window_secs)
                .query_async(&mut conn)
                .await?;
        }

        Ok(count)
    }
}

#[async_trait]
impl RateLimiter for RedisLimiter {
    async fn allow(&self, key: &str, max_requests: u32) -> Result<bool, AppError> {
        match self.count(key).await {
            Ok(count) => Ok(count <= max_requests),
            // Fail open: an unreachable counter store degrades to no limiting
            // rather than taking the whole API down.
            Err(e) => {
                warn!("rate limiter unavailable, admitting request: {e}");
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_in_memory_admits_up_to_limit() {
        let limiter = InMemoryLimiter::new(Duration::from_secs(60));
        for _ in 0..3 {
            assert!(limiter.allow("1.2.3.4", 3).await.unwrap());
        }
        assert!(!limiter.allow("1.2.3.4", 3).await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_keys_are_independent() {
        let limiter = InMemoryLimiter::new(Duration::from_secs(60));
        assert!(limiter.allow("a", 1).await.unwrap());
        assert!(!limiter.allow("a", 1).await.unwrap());
        assert!(limiter.allow("b", 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_window_resets() {
        let limiter = InMemoryLimiter::new(Duration::from_millis(20));
        assert!(limiter.allow("a", 1).await.unwrap());
        assert!(!limiter.allow("a", 1).await.unwrap());
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(limiter.allow("a", 1).await.unwrap());
    }

    #[test]
    fn test_client_key_from_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_key(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_key_falls_back_to_unknown() {
        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}

//! Fixed-window rate limiting keyed by client identifier.
//!
//! [`RateLimiter`] holds the policy (window length, request budget, key
//! prefix) and delegates counting to a [`RateLimitStore`]. The in-memory store
//! is per-process; a multi-instance deployment needs a shared store behind
//! the same trait.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::CoreError;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Default request budget per window for general API traffic.
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

/// Default request budget per window for vote submissions.
pub const DEFAULT_VOTE_MAX_REQUESTS: u32 = 10;

/// How often expired windows are pruned from the in-memory store.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
    /// Scope of the limiter; keys are stored as `"{key_prefix}:{identifier}"`.
    pub key_prefix: String,
}

impl RateLimitConfig {
    pub fn new(window: Duration, max_requests: u32, key_prefix: impl Into<String>) -> Self {
        Self {
            window,
            max_requests,
            key_prefix: key_prefix.into(),
        }
    }

    /// The stricter policy applied to vote submissions.
    pub fn vote(window: Duration, max_requests: u32) -> Self {
        Self::new(window, max_requests, "vote")
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_MAX_REQUESTS, "global")
    }
}

/// State of a window after a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHit {
    /// Requests counted in the current window, including this one.
    pub count: u32,
    /// Time until the window resets.
    pub resets_in: Duration,
}

/// Remaining budget for an identifier with an active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub remaining: u32,
    pub resets_in: Duration,
}

/// Counter storage behind a [`RateLimiter`].
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Count one request against `key`, opening a new window of length
    /// `window` when none is active.
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowHit, CoreError>;

    /// Current window for `key` without counting a request.
    async fn peek(&self, key: &str) -> Result<Option<WindowHit>, CoreError>;

    /// Drop expired windows. Returns how many were removed.
    async fn sweep(&self) -> Result<usize, CoreError>;
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

impl WindowEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.reset_at
    }

    fn to_hit(self, now: Instant) -> WindowHit {
        WindowHit {
            count: self.count,
            resets_in: self.reset_at.saturating_duration_since(now),
        }
    }
}

/// Process-local [`RateLimitStore`].
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked keys, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowHit, CoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get_mut(key).filter(|e| !e.is_expired(now)) {
            entry.count = entry.count.saturating_add(1);
            return Ok(entry.to_hit(now));
        }

        let fresh = WindowEntry {
            count: 1,
            reset_at: now + window,
        };
        entries.insert(key.to_string(), fresh);
        Ok(fresh.to_hit(now))
    }

    async fn peek(&self, key: &str) -> Result<Option<WindowHit>, CoreError> {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.to_hit(now)))
    }

    async fn sweep(&self) -> Result<usize, CoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok(before - entries.len())
    }
}

/// A fixed-window limiter over a shared store.
///
/// Several limiters may share one store as long as their key prefixes differ.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig, store: Arc<dyn RateLimitStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn key(&self, identifier: &str) -> String {
        format!("{}:{}", self.config.key_prefix, identifier)
    }

    /// Count a request from `identifier`.
    ///
    /// Fails with [`CoreError::RateLimited`] once the window's budget is
    /// exhausted; the error carries the whole seconds left in the window.
    pub async fn check(&self, identifier: &str) -> Result<(), CoreError> {
        let hit = self
            .store
            .hit(&self.key(identifier), self.config.window)
            .await?;

        if hit.count > self.config.max_requests {
            let retry_after_secs = hit.resets_in.as_millis().div_ceil(1000).max(1) as u64;
            return Err(CoreError::RateLimited { retry_after_secs });
        }
        Ok(())
    }

    /// Remaining budget for `identifier`, or `None` when it has no active window.
    pub async fn info(&self, identifier: &str) -> Result<Option<RateLimitInfo>, CoreError> {
        let hit = self.store.peek(&self.key(identifier)).await?;
        Ok(hit.map(|hit| RateLimitInfo {
            remaining: self.config.max_requests.saturating_sub(hit.count),
            resets_in: hit.resets_in,
        }))
    }
}

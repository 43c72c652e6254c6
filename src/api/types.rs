//! Shared types for the portal API layer.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::core_state::CoreState;

/// Failed admin sign-ins tolerated per source within one window.
const LOGIN_FAILURES_PER_WINDOW: usize = 5;
const LOGIN_WINDOW_SECS: u64 = 60;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the portal API router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
/// Wraps `CoreState` plus API-specific bookkeeping.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    pub login_throttle: Arc<Mutex<LoginThrottle>>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self {
            core,
            login_throttle: Arc::new(Mutex::new(LoginThrottle::new())),
        }
    }
}

/// Marker injected by the admin auth middleware after token validation.
#[derive(Debug, Clone, Copy)]
pub struct AdminContext;

// ═══════════════════════════════════════════════════════════
// Login throttle: sliding window over failed admin sign-ins
// ═══════════════════════════════════════════════════════════

/// Keyed on the peer IP address of the connection, never on request headers.
pub struct LoginThrottle {
    failures: HashMap<IpAddr, Vec<Instant>>,
    limit: usize,
    window: Duration,
}

impl LoginThrottle {
    pub fn new() -> Self {
        Self::with_limit(LOGIN_FAILURES_PER_WINDOW, Duration::from_secs(LOGIN_WINDOW_SECS))
    }

    pub fn with_limit(limit: usize, window: Duration) -> Self {
        Self {
            failures: HashMap::new(),
            limit,
            window,
        }
    }

    /// `Err(retry_after_secs)` while `source` has too many recent failures.
    pub fn check(&mut self, source: IpAddr) -> Result<(), u64> {
        let now = Instant::now();
        self.evict_expired(now);
        let Some(entries) = self.failures.get(&source) else {
            return Ok(());
        };
        if entries.len() < self.limit {
            return Ok(());
        }
        let oldest = entries.iter().min().copied().unwrap_or(now);
        let remaining = self.window.saturating_sub(now.duration_since(oldest));
        Err(remaining.as_secs().max(1))
    }

    pub fn record_failure(&mut self, source: IpAddr) {
        let now = Instant::now();
        self.evict_expired(now);
        self.failures.entry(source).or_default().push(now);
    }

    pub fn clear(&mut self, source: IpAddr) {
        self.failures.remove(&source);
    }

    /// Drop failures older than the window, and sources left with none.
    fn evict_expired(&mut self, now: Instant) {
        let window = self.window;
        self.failures.retain(|_, entries| {
            entries.retain(|ts| now.duration_since(*ts) < window);
            !entries.is_empty()
        });
    }
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new()
    }
}

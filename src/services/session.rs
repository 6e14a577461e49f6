//! Per-session state and the in-memory session store.
//!
//! ARCHITECTURE
//! ============
//! A session is keyed by a random hex token carried in a cookie. The store
//! owns every `SessionState`; handlers borrow one through `with_session`,
//! which runs a synchronous closure under the store's write lock so each
//! interaction is applied atomically.
//!
//! LIFECYCLE
//! =========
//! Sessions are created lazily by the first mutating access (missing or
//! unknown token). Read-only page views go through `with_existing` and never
//! create one. Sessions are disposed explicitly via `end`, or dropped by the
//! idle reaper. Nothing is persisted; a restart starts everyone over.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::chat::ChatHistory;
use super::feedback::FeedbackLog;
use super::ideas::IdeaLog;
use super::reference::Reference;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex session token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

// =============================================================================
// NOTICE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Success,
}

/// One-shot message shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// Everything one user session owns.
#[derive(Debug)]
pub struct SessionState {
    pub chat: ChatHistory,
    pub ideas: IdeaLog,
    pub feedback: FeedbackLog,
    /// Current picker value; read at the time of each chat/idea submission.
    pub reference: Option<Reference>,
    notice: Option<Notice>,
    last_seen: Instant,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            chat: ChatHistory::new(),
            ideas: IdeaLog::new(),
            feedback: FeedbackLog::new(),
            reference: None,
            notice: None,
            last_seen: Instant::now(),
        }
    }

    /// Replace any pending notice.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Remove and return the pending notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Token of the session a request ended up on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    pub token: String,
    /// `true` if the session was created by this request.
    pub created: bool,
}

/// All live sessions. Clone is cheap; clones share the same map.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the session for `token`, creating a fresh session if
    /// the token is missing or unknown.
    pub async fn with_session<R>(
        &self,
        token: Option<&str>,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> (ResolvedSession, R) {
        let mut sessions = self.sessions.write().await;

        let (token, created) = match token {
            Some(existing) if sessions.contains_key(existing) => (existing.to_owned(), false),
            _ => (generate_token(), true),
        };
        if created {
            info!(sessions = sessions.len() + 1, "session created");
        }

        let session = sessions.entry(token.clone()).or_default();
        session.last_seen = Instant::now();
        let out = f(session);
        (ResolvedSession { token, created }, out)
    }

    /// Run `f` against the session for `token` only if it already exists.
    /// Missing or unknown tokens return `None` and store nothing.
    pub async fn with_existing<R>(
        &self,
        token: Option<&str>,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> Option<R> {
        let token = token?;
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(token)?;
        session.last_seen = Instant::now();
        Some(f(session))
    }

    /// Resolve a token without touching the session's contents.
    pub async fn resolve(&self, token: Option<&str>) -> ResolvedSession {
        self.with_session(token, |_| ()).await.0
    }

    /// Dispose a session. Returns `false` if the token was unknown.
    pub async fn end(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token).is_some();
        if removed {
            info!("session ended");
        }
        removed
    }

    /// Drop sessions idle for longer than `max_idle` as of `now`.
    /// Returns the number of sessions removed.
    pub async fn evict_idle_at(&self, now: Instant, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_duration_since(s.last_seen) <= max_idle);
        before - sessions.len()
    }

    /// Drop sessions idle for longer than `max_idle`.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        self.evict_idle_at(Instant::now(), max_idle).await
    }

    pub async fn contains(&self, token: &str) -> bool {
        self.sessions.read().await.contains_key(token)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Spawn the idle-session reaper. Returns a handle for shutdown.
pub fn spawn_session_reaper(store: SessionStore, max_idle: Duration, interval: Duration) -> JoinHandle<()> {
    info!(max_idle_secs = max_idle.as_secs(), interval_secs = interval.as_secs(), "session reaper configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let evicted = store.evict_idle(max_idle).await;
            if evicted > 0 {
                debug!(evicted, "idle sessions evicted");
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "wc_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Warning,
}

/// One-shot message shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub has_participated: bool,
    pub admin_authenticated: bool,
    /// Sequence number used in the next archive filename.
    pub appreciation_number: u32,
    pub saved_files: Vec<String>,
    /// Set when a non-empty code was entered and did not match.
    pub admin_denied: bool,
    pub notice: Option<Notice>,
    pub last_seen: Instant,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            has_participated: false,
            admin_authenticated: false,
            appreciation_number: 1,
            saved_files: Vec::new(),
            admin_denied: false,
            notice: None,
            last_seen: Instant::now(),
        }
    }
}

impl SessionState {
    /// Compares `code` verbatim against `secret`. An empty code signs the session out.
    pub fn authenticate(&mut self, code: &str, secret: &str) -> bool {
        self.admin_authenticated = !code.is_empty() && code == secret;
        self.admin_denied = !code.is_empty() && !self.admin_authenticated;
        self.admin_authenticated
    }
}

pub type SessionMap = HashMap<Uuid, SessionState>;

#[derive(Clone)]
pub struct Sessions {
    inner: Arc<Mutex<SessionMap>>,
    idle_ttl: Duration,
}

impl Sessions {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Locks the map after dropping sessions idle for longer than the TTL.
    pub async fn lock(&self) -> MutexGuard<'_, SessionMap> {
        let mut map = self.inner.lock().await;
        evict_idle(&mut map, self.idle_ttl, Instant::now());
        map
    }

    /// Returns the session for `id`, creating it if needed, and marks it as seen.
    pub fn touch(map: &mut SessionMap, id: Uuid) -> &mut SessionState {
        let session = map.entry(id).or_default();
        session.last_seen = Instant::now();
        session
    }

    /// Lets every visitor vote again after a reset.
    pub fn clear_participation(map: &mut SessionMap) {
        for session in map.values_mut() {
            session.has_participated = false;
        }
    }
}

pub fn evict_idle(map: &mut SessionMap, ttl: Duration, now: Instant) {
    let before = map.len();
    map.retain(|_, session| now.saturating_duration_since(session.last_seen) <= ttl);
    let evicted = before - map.len();
    if evicted > 0 {
        debug!(evicted, remaining = map.len(), "idle sessions dropped");
    }
}

/// Reads the session id from the cookie jar, issuing a fresh one when it is absent or garbled.
pub fn session_id(jar: CookieJar) -> (CookieJar, Uuid) {
    if let Some(id) = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    {
        return (jar, id);
    }

    let id = Uuid::new_v4();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id)
}

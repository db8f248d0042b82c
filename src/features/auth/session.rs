//! Process-wide registry of sessions that already passed the admin gate.
//!
//! Entries are keyed by a SHA-256 fingerprint of the access token so raw
//! tokens never sit in memory longer than a request. A cached entry skips the
//! provider and profile round trips until `recheck_after` elapses; after that
//! the gate re-validates it against the provider.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::model::AdminSession;

struct CachedSession {
    session: AdminSession,
    checked_at: Instant,
}

pub struct SessionContext {
    sessions: RwLock<HashMap<String, CachedSession>>,
    recheck_after: Duration,
}

impl SessionContext {
    pub fn new(recheck_after: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            recheck_after,
        }
    }

    pub fn fingerprint(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }

    /// A cached session that is neither expired nor due for a recheck
    pub async fn current(&self, token: &str) -> Option<AdminSession> {
        let key = Self::fingerprint(token);
        let sessions = self.sessions.read().await;
        let cached = sessions.get(&key)?;

        if cached.session.is_expired(Utc::now()) || cached.checked_at.elapsed() >= self.recheck_after
        {
            return None;
        }

        Some(cached.session.clone())
    }

    /// Record a session that just passed the gate
    pub async fn init(&self, token: &str, session: AdminSession) {
        let key = Self::fingerprint(token);
        self.sessions.write().await.insert(
            key,
            CachedSession {
                session,
                checked_at: Instant::now(),
            },
        );
    }

    /// Forget a session; returns whether it was cached
    pub async fn invalidate(&self, token: &str) -> bool {
        let key = Self::fingerprint(token);
        self.sessions.write().await.remove(&key).is_some()
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, cached| !cached.session.is_expired(now));
        before - sessions.len()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Periodically purge expired sessions for the lifetime of the process
    pub fn spawn_janitor(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let purged = self.purge_expired().await;
                if purged > 0 {
                    tracing::debug!("Purged {} expired admin sessions", purged);
                }
            }
        })
    }
}

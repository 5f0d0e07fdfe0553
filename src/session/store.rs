use std::collections::HashMap;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;

use super::Session;

/// Storage for sessions, keyed by the opaque token from the `sid` cookie.
/// Swappable so a multi-instance deployment can move sessions out of
/// process memory without touching the handlers.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a live session; expired or unknown tokens return `None`.
    async fn load(&self, token: &str) -> Option<Session>;
    /// Saves a session and refreshes its expiry.
    async fn save(&self, token: &str, session: Session);
    async fn remove(&self, token: &str);
}

/// In-process store with a sliding TTL.
pub struct MemorySessionStore {
    ttl: Duration,
    entries: RwLock<HashMap<String, (Session, OffsetDateTime)>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, token: &str) -> Option<Session> {
        let now = OffsetDateTime::now_utc();
        {
            let entries = self.entries.read().await;
            match entries.get(token) {
                Some((session, expires_at)) if *expires_at > now => {
                    return Some(session.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Entry exists but is stale; drop it.
        self.entries.write().await.remove(token);
        None
    }

    async fn save(&self, token: &str, session: Session) {
        let now = OffsetDateTime::now_utc();
        let mut entries = self.entries.write().await;
        // Saves are the write path anyway, so reclaim abandoned sessions
        // here instead of waiting for their exact token to be loaded.
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(token.to_string(), (session, now + self.ttl));
    }

    async fn remove(&self, token: &str) {
        self.entries.write().await.remove(token);
    }
}

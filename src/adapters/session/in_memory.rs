//! In-memory session store.
//!
//! Sessions live in process memory and are lost on restart. Entries expire
//! after an idle period; expiry is checked on load and expired entries are
//! purged whenever a session is saved.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::SessionData;
use crate::ports::{SessionStore, SessionStoreError};

struct Entry {
    data: SessionData,
    expires_at: Timestamp,
}

impl Entry {
    fn is_expired(&self, now: &Timestamp) -> bool {
        !now.is_before(&self.expires_at)
    }
}

/// Process-local session storage with idle expiry.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    idle_timeout: Duration,
}

impl InMemorySessionStore {
    /// Creates an empty store whose sessions expire after `idle_timeout`.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Number of stored entries, expired ones included until purged.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True if no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn expiry_from(&self, now: &Timestamp) -> Timestamp {
        now.plus_secs(self.idle_timeout.as_secs())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>, SessionStoreError> {
        let now = Timestamp::now();
        let sessions = self.sessions.read().await;

        Ok(sessions
            .get(id)
            .filter(|entry| !entry.is_expired(&now))
            .map(|entry| entry.data.clone()))
    }

    async fn save(&self, id: &SessionId, data: &SessionData) -> Result<(), SessionStoreError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(&now));
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired sessions");
        }

        sessions.insert(
            *id,
            Entry {
                data: data.clone(),
                expires_at: self.expiry_from(&now),
            },
        );
        Ok(())
    }

    async fn update(&self, id: &SessionId, data: &SessionData) -> Result<bool, SessionStoreError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;

        match sessions.get_mut(id).filter(|entry| !entry.is_expired(&now)) {
            Some(entry) => {
                entry.data = data.clone();
                entry.expires_at = self.expiry_from(&now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn touch(&self, id: &SessionId) -> Result<bool, SessionStoreError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;

        match sessions.get_mut(id).filter(|entry| !entry.is_expired(&now)) {
            Some(entry) => {
                entry.expires_at = self.expiry_from(&now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}

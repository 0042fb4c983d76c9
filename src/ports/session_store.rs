//! Session store port.
//!
//! Persists [`SessionData`] between requests, keyed by [`SessionId`].
//! Implementations own expiry: an expired session loads as `None`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionData;

/// Errors from a session backend.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    #[error("Session backend unavailable: {0}")]
    Unavailable(String),
}

/// Server-side storage for browser sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a live session.
    ///
    /// Returns `None` for unknown or expired ids.
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>, SessionStoreError>;

    /// Insert or replace a session, refreshing its expiry.
    ///
    /// Only for ids the caller just minted; existing sessions go
    /// through [`SessionStore::update`].
    async fn save(&self, id: &SessionId, data: &SessionData) -> Result<(), SessionStoreError>;

    /// Replace the data of a live session and refresh its expiry.
    ///
    /// Returns `false` without storing anything when the id is unknown or
    /// expired, so a deleted session is never written back.
    async fn update(&self, id: &SessionId, data: &SessionData) -> Result<bool, SessionStoreError>;

    /// Refresh the expiry of a live session. Returns `false` if it is gone.
    async fn touch(&self, id: &SessionId) -> Result<bool, SessionStoreError>;

    /// Remove a session. Unknown ids are not an error.
    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError>;
}

//! Server-side session contents.

use super::{DbCredentials, Flash};

/// Role label shown when the user has no granted role.
///
/// Mirrors the database: a login without memberships acts as itself.
pub fn fallback_role_label(credentials: &DbCredentials) -> String {
    credentials.username().as_str().to_string()
}

/// A logged-in user: the credentials every request connects with.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub credentials: DbCredentials,
    /// Display-only; the database enforces permissions itself.
    pub role: String,
}

impl LoginSession {
    pub fn new(credentials: DbCredentials, role: impl Into<String>) -> Self {
        Self {
            credentials,
            role: role.into(),
        }
    }

    pub fn username(&self) -> &str {
        self.credentials.username().as_str()
    }
}

/// Everything stored for one browser session.
///
/// A session may carry flashes without a login, e.g. right after a failed
/// login or a logout.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    login: Option<LoginSession>,
    flashes: Vec<Flash>,
}

impl SessionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self) -> Option<&LoginSession> {
        self.login.as_ref()
    }

    pub fn set_login(&mut self, login: LoginSession) {
        self.login = Some(login);
    }

    pub fn push_flash(&mut self, flash: Flash) {
        self.flashes.push(flash);
    }

    /// Pending flashes, without consuming them.
    pub fn flashes(&self) -> &[Flash] {
        &self.flashes
    }

    /// Removes and returns pending flashes.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }

    /// Drops the login and any pending flashes.
    pub fn clear(&mut self) {
        self.login = None;
        self.flashes.clear();
    }

    /// True when nothing is worth persisting.
    pub fn is_empty(&self) -> bool {
        self.login.is_none() && self.flashes.is_empty()
    }
}

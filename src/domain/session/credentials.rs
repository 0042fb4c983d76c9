//! Database credentials captured at login.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{Username, ValidationError};

/// The login/password pair a session connects with.
///
/// The password is only exposed to the database driver.
#[derive(Debug, Clone)]
pub struct DbCredentials {
    username: Username,
    password: SecretString,
}

impl DbCredentials {
    /// Creates credentials from a login form.
    ///
    /// An empty password is accepted here; the database decides whether it
    /// is valid.
    pub fn new(username: &str, password: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: SecretString::new(password.into()),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Exposes the password for the connect call.
    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }
}

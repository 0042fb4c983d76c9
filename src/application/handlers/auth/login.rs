//! LoginHandler - Command handler for logging a user in.
//!
//! A login is a test connection: if PostgreSQL accepts the username and
//! password, the credentials are good enough to keep in the session. The
//! same connection then looks up the role label shown in the page header.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::gym::DatabaseError;
use crate::domain::session::{fallback_role_label, DbCredentials, LoginSession};
use crate::ports::DatabaseConnector;

/// Command to log in with database credentials.
#[derive(Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Why a login did not produce a session.
#[derive(Debug, Clone, Error)]
pub enum LoginError {
    #[error("invalid login form: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("database refused login: {0}")]
    Rejected(#[from] DatabaseError),
}

/// Handler for logging in.
pub struct LoginHandler {
    connector: Arc<dyn DatabaseConnector>,
}

impl LoginHandler {
    pub fn new(connector: Arc<dyn DatabaseConnector>) -> Self {
        Self { connector }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginSession, LoginError> {
        let credentials = DbCredentials::new(&cmd.username, cmd.password)?;

        let mut conn = self.connector.connect(Some(&credentials)).await?;

        // The role is a label only; failing to read it must not block a
        // login the database already accepted.
        let role = match conn.primary_role(credentials.username()).await {
            Ok(Some(role)) => role,
            Ok(None) => fallback_role_label(&credentials),
            Err(e) => {
                tracing::warn!(
                    username = %credentials.username(),
                    error = %e,
                    "Role lookup failed, using username as role label"
                );
                fallback_role_label(&credentials)
            }
        };
        conn.close().await;

        Ok(LoginSession::new(credentials, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGymDatabase;

    fn database() -> Arc<InMemoryGymDatabase> {
        Arc::new(
            InMemoryGymDatabase::new()
                .with_user("recepcion", "recepcion-pw", Some("rol_recepcion"))
                .with_user("dueno", "dueno-pw", None),
        )
    }

    fn cmd(username: &str, password: &str) -> LoginCommand {
        LoginCommand {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_produce_login_with_role() {
        let db = database();
        let handler = LoginHandler::new(db.clone());

        let login = handler.handle(cmd("recepcion", "recepcion-pw")).await.unwrap();
        assert_eq!(login.username(), "recepcion");
        assert_eq!(login.role, "rol_recepcion");
        assert_eq!(login.credentials.expose_password(), "recepcion-pw");
        assert_eq!(db.open_connections(), 0);
    }

    #[tokio::test]
    async fn user_without_grant_is_labelled_with_username() {
        let handler = LoginHandler::new(database());

        let login = handler.handle(cmd("dueno", "dueno-pw")).await.unwrap();
        assert_eq!(login.role, "dueno");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let handler = LoginHandler::new(database());

        let result = handler.handle(cmd("recepcion", "nope")).await;
        assert!(matches!(
            result,
            Err(LoginError::Rejected(DatabaseError::ConnectionRejected { .. }))
        ));
    }

    #[tokio::test]
    async fn blank_username_never_reaches_database() {
        let db = database();
        let handler = LoginHandler::new(db.clone());

        let result = handler.handle(cmd("  ", "x")).await;
        assert!(matches!(result, Err(LoginError::InvalidInput(_))));
        assert_eq!(db.connections_opened(), 0);
    }

    #[tokio::test]
    async fn failed_role_lookup_falls_back_to_username() {
        let db = Arc::new(
            InMemoryGymDatabase::new()
                .with_user("recepcion", "pw", Some("rol_recepcion"))
                .with_role_lookup_error(DatabaseError::permission_denied(
                    "permission denied for view pg_user",
                )),
        );
        let handler = LoginHandler::new(db);

        let login = handler.handle(cmd("recepcion", "pw")).await.unwrap();
        assert_eq!(login.role, "recepcion");
    }
}

//! Data-access errors for the gym tables.
//!
//! Authorization is enforced by the database, so most of these variants
//! describe a decision PostgreSQL made about the logged-in role. They carry
//! the SQLSTATE code so the HTTP layer can phrase a message for the user.

use thiserror::Error;

/// SQLSTATE codes the portal reacts to.
pub mod sqlstate {
    /// `unique_violation`
    pub const UNIQUE_VIOLATION: &str = "23505";
    /// `insufficient_privilege`
    pub const INSUFFICIENT_PRIVILEGE: &str = "42501";
    /// `invalid_password`
    pub const INVALID_PASSWORD: &str = "28P01";
    /// `invalid_authorization_specification`
    pub const INVALID_AUTHORIZATION: &str = "28000";
}

/// Errors from opening a connection or running a gym statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseError {
    /// The session holds no credentials.
    #[error("not logged in")]
    NotLoggedIn,

    /// The database refused the login (bad password, revoked LOGIN, ...).
    #[error("connection rejected: {message}")]
    ConnectionRejected {
        code: Option<String>,
        message: String,
    },

    /// The database could not be reached.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// A unique constraint rejected the statement.
    #[error("unique violation: {message}")]
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },

    /// The logged-in role lacks a grant for the statement.
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    /// Any other error reported by the database.
    #[error("query failed ({}): {message}", code.as_deref().unwrap_or("?????"))]
    Query {
        code: Option<String>,
        message: String,
    },

    /// The connection was used after `close`.
    #[error("connection already closed")]
    Closed,
}

impl DatabaseError {
    /// Classifies a database-reported error by its SQLSTATE.
    pub fn from_sqlstate(
        code: Option<&str>,
        message: impl Into<String>,
        constraint: Option<&str>,
    ) -> Self {
        let message = message.into();
        match code {
            Some(sqlstate::UNIQUE_VIOLATION) => DatabaseError::UniqueViolation {
                constraint: constraint.map(str::to_string),
                message,
            },
            Some(sqlstate::INSUFFICIENT_PRIVILEGE) => DatabaseError::PermissionDenied { message },
            Some(code @ (sqlstate::INVALID_PASSWORD | sqlstate::INVALID_AUTHORIZATION)) => {
                DatabaseError::ConnectionRejected {
                    code: Some(code.to_string()),
                    message,
                }
            }
            other => DatabaseError::Query {
                code: other.map(str::to_string),
                message,
            },
        }
    }

    /// Creates a permission-denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        DatabaseError::PermissionDenied {
            message: message.into(),
        }
    }

    /// SQLSTATE code, when the database reported one.
    pub fn code(&self) -> Option<&str> {
        match self {
            DatabaseError::UniqueViolation { .. } => Some(sqlstate::UNIQUE_VIOLATION),
            DatabaseError::PermissionDenied { .. } => Some(sqlstate::INSUFFICIENT_PRIVILEGE),
            DatabaseError::ConnectionRejected { code, .. } | DatabaseError::Query { code, .. } => {
                code.as_deref()
            }
            DatabaseError::NotLoggedIn | DatabaseError::Unavailable(_) | DatabaseError::Closed => {
                None
            }
        }
    }

    /// Message as reported by the database, without classification prefix.
    pub fn database_message(&self) -> String {
        match self {
            DatabaseError::ConnectionRejected { message, .. }
            | DatabaseError::UniqueViolation { message, .. }
            | DatabaseError::PermissionDenied { message }
            | DatabaseError::Query { message, .. } => message.clone(),
            DatabaseError::Unavailable(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns true if no usable connection could be obtained.
    ///
    /// Such failures send the user back to the login page; statement
    /// failures keep them logged in.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            DatabaseError::NotLoggedIn
                | DatabaseError::ConnectionRejected { .. }
                | DatabaseError::Unavailable(_)
                | DatabaseError::Closed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_classified() {
        let err = DatabaseError::from_sqlstate(
            Some("23505"),
            "duplicate key value violates unique constraint \"miembro_correo_key\"",
            Some("miembro_correo_key"),
        );
        assert!(matches!(
            err,
            DatabaseError::UniqueViolation { ref constraint, .. }
                if constraint.as_deref() == Some("miembro_correo_key")
        ));
        assert_eq!(err.code(), Some("23505"));
    }

    #[test]
    fn insufficient_privilege_is_permission_denied() {
        let err = DatabaseError::from_sqlstate(Some("42501"), "permission denied for table pago", None);
        assert_eq!(err, DatabaseError::permission_denied("permission denied for table pago"));
        assert_eq!(err.code(), Some("42501"));
        assert!(!err.is_connection_failure());
    }

    #[test]
    fn authentication_failures_are_connection_rejections() {
        let err = DatabaseError::from_sqlstate(Some("28P01"), "password authentication failed", None);
        assert!(err.is_connection_failure());
        assert_eq!(err.code(), Some("28P01"));
    }

    #[test]
    fn unknown_codes_are_kept() {
        let err = DatabaseError::from_sqlstate(Some("42P01"), "relation \"clase\" does not exist", None);
        assert_eq!(err.code(), Some("42P01"));
        assert_eq!(err.database_message(), "relation \"clase\" does not exist");
        assert_eq!(
            err.to_string(),
            "query failed (42P01): relation \"clase\" does not exist"
        );
    }

    #[test]
    fn missing_code_displays_placeholder() {
        let err = DatabaseError::from_sqlstate(None, "boom", None);
        assert_eq!(err.to_string(), "query failed (?????): boom");
    }

    #[test]
    fn not_logged_in_is_connection_failure() {
        assert!(DatabaseError::NotLoggedIn.is_connection_failure());
        assert!(DatabaseError::Closed.is_connection_failure());
        assert_eq!(DatabaseError::NotLoggedIn.code(), None);
    }
}

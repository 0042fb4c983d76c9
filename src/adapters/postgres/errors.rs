//! Mapping from sqlx errors to gym data-access errors.

use sqlx::Error as SqlxError;

use crate::domain::gym::DatabaseError;

/// Classifies a statement error by SQLSTATE.
pub(crate) fn map_sqlx_error(err: SqlxError) -> DatabaseError {
    match err {
        SqlxError::Database(db_err) => DatabaseError::from_sqlstate(
            db_err.code().as_deref(),
            db_err.message(),
            db_err.constraint(),
        ),
        SqlxError::Io(e) => DatabaseError::Unavailable(e.to_string()),
        SqlxError::Tls(e) => DatabaseError::Unavailable(format!("TLS error: {}", e)),
        SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::WorkerCrashed => {
            DatabaseError::Unavailable(err.to_string())
        }
        other => DatabaseError::Query {
            code: None,
            message: other.to_string(),
        },
    }
}

/// Classifies an error raised while opening a connection.
///
/// Anything the server reports during the handshake (unknown database,
/// role without LOGIN, ...) means the session cannot connect.
pub(crate) fn map_connect_error(err: SqlxError) -> DatabaseError {
    match map_sqlx_error(err) {
        e if e.is_connection_failure() => e,
        e => DatabaseError::ConnectionRejected {
            code: e.code().map(str::to_string),
            message: e.database_message(),
        },
    }
}

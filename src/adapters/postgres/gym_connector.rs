//! PostgreSQL implementation of DatabaseConnector.
//!
//! Opens a fresh `PgConnection` per call using the session's credentials.
//! The base options carry only host, database and transport settings; the
//! process never connects with an identity of its own.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{Connection, PgConnection};

use crate::config::DatabaseConfig;
use crate::domain::gym::DatabaseError;
use crate::domain::session::DbCredentials;
use crate::ports::{DatabaseConnector, GymConnection};

use super::errors::map_connect_error;
use super::gym_connection::PostgresGymConnection;

/// Connector that authenticates every connection as the session user.
#[derive(Clone)]
pub struct PostgresConnector {
    base: PgConnectOptions,
    connect_timeout: Duration,
}

impl PostgresConnector {
    /// Creates a connector from prepared base options.
    pub fn new(base: PgConnectOptions, connect_timeout: Duration) -> Self {
        Self {
            base,
            connect_timeout,
        }
    }

    /// Creates a connector from configuration.
    ///
    /// `.pgpass` and `PGUSER`/`PGPASSWORD` are never consulted.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let ssl_mode: PgSslMode = config.ssl_mode.parse().map_err(|_| DatabaseError::Query {
            code: None,
            message: format!("invalid ssl mode: {}", config.ssl_mode),
        })?;

        let base = PgConnectOptions::new_without_pgpass()
            .host(&config.host)
            .port(config.port)
            .database(&config.dbname)
            .ssl_mode(ssl_mode)
            .application_name(&config.application_name);

        Ok(Self::new(base, config.connect_timeout()))
    }

    fn options_for(&self, credentials: &DbCredentials) -> PgConnectOptions {
        self.base
            .clone()
            .username(credentials.username().as_str())
            .password(credentials.expose_password())
    }
}

#[async_trait]
impl DatabaseConnector for PostgresConnector {
    async fn connect(
        &self,
        credentials: Option<&DbCredentials>,
    ) -> Result<Box<dyn GymConnection>, DatabaseError> {
        let credentials = credentials.ok_or(DatabaseError::NotLoggedIn)?;
        let username = credentials.username().as_str();
        let options = self.options_for(credentials);

        let conn = tokio::time::timeout(self.connect_timeout, PgConnection::connect_with(&options))
            .await
            .map_err(|_| {
                DatabaseError::Unavailable(format!(
                    "connect timed out after {}s",
                    self.connect_timeout.as_secs()
                ))
            })?
            .map_err(map_connect_error);

        match conn {
            Ok(conn) => {
                tracing::debug!(username = %username, "Opened database connection");
                Ok(Box::new(PostgresGymConnection::new(conn, username)))
            }
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Database connection failed");
                Err(e)
            }
        }
    }
}

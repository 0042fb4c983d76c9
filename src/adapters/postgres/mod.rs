//! PostgreSQL adapters - Database implementations of the connector port.
//!
//! - `PostgresConnector` - Opens one connection per request as the session user
//! - `PostgresGymConnection` - Runs the portal's fixed statements

mod errors;
mod gym_connection;
mod gym_connector;

pub use gym_connection::PostgresGymConnection;
pub use gym_connector::PostgresConnector;

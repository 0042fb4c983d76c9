//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `DatabaseConnector` / `GymConnection` - per-request database access
//!   under the user's own role
//! - `SessionStore` - server-side session persistence

mod database_connector;
mod session_store;

pub use database_connector::{DatabaseConnector, GymConnection};
pub use session_store::{SessionStore, SessionStoreError};

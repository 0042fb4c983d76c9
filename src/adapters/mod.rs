//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Per-request PostgreSQL connections as the session user
//! - `memory` - In-memory gym database with users and grants (tests, demos)
//! - `session` - Session store and signed session cookies
//! - `html` - Server-rendered pages
//! - `http` - Axum router, session middleware and page handlers

pub mod html;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod session;

pub use self::http::{build_router, GymAppState};
pub use memory::InMemoryGymDatabase;
pub use postgres::PostgresConnector;
pub use session::{InMemorySessionStore, SessionCookieSigner};

//! Application handlers.
//!
//! Command and query handlers that coordinate the ports.

pub mod auth;
pub mod gym;

pub use auth::{LoginCommand, LoginError, LoginHandler};
pub use gym::{CreateMemberHandler, ListClassesHandler, ListMembersHandler, ListPaymentsHandler};

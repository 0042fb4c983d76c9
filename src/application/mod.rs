//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates the per-request connection lifecycle between
//! the HTTP adapters and the database connector port.

pub mod handlers;

pub use handlers::{
    CreateMemberHandler, ListClassesHandler, ListMembersHandler, ListPaymentsHandler,
    LoginCommand, LoginError, LoginHandler,
};

//! Gym data handlers.
//!
//! Each handler opens a connection with the session's credentials, runs
//! one statement, and closes the connection whatever the outcome.

mod create_member;
mod list_classes;
mod list_members;
mod list_payments;

pub use create_member::CreateMemberHandler;
pub use list_classes::ListClassesHandler;
pub use list_members::ListMembersHandler;
pub use list_payments::ListPaymentsHandler;

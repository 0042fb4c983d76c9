//! Domain layer containing the portal's types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, validation errors)
//! - `gym` - Member, class and payment rows plus data-access errors
//! - `session` - Credentials, login state and flash messages

pub mod foundation;
pub mod gym;
pub mod session;

//! Authentication handlers.

mod login;

pub use login::{LoginCommand, LoginError, LoginHandler};

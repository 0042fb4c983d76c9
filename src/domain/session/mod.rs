//! Session module - what the portal remembers about a browser.
//!
//! The session is the only place the user's database password lives. It
//! is created by a successful test connection at login and dropped on
//! logout or process restart.

mod credentials;
mod data;
mod flash;

pub use credentials::DbCredentials;
pub use data::{fallback_role_label, LoginSession, SessionData};
pub use flash::{Flash, FlashLevel};

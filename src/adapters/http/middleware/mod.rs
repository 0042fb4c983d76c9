//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `session` - Signed-cookie sessions and the login extractor

pub mod session;

pub use session::{
    session_middleware, CookieSettings, LoginRejection, RequireLogin, Session, SessionLayerMissing,
};

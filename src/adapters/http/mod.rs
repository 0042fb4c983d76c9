//! HTTP adapters - Server-rendered pages over axum.
//!
//! Each feature module has its own routes; `build_router` assembles them
//! with the session and observability layers.

pub mod auth;
pub mod gym;
pub mod health;
pub mod middleware;

mod failures;
mod router;
mod state;
mod views;

pub use middleware::{CookieSettings, RequireLogin, Session};
pub use router::build_router;
pub use state::GymAppState;

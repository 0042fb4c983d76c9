//! Axum router configuration for authentication endpoints.

use axum::{routing::get, Router};

use super::super::state::GymAppState;
use super::handlers::{logout, show_login, submit_login};

/// Create the authentication router.
///
/// # Routes
/// - `GET /login` - Login form
/// - `POST /login` - Test-connect with the submitted credentials
/// - `GET /logout` - Clear the session
pub fn auth_routes() -> Router<GymAppState> {
    Router::new()
        .route("/login", get(show_login).post(submit_login))
        .route("/logout", get(logout))
}

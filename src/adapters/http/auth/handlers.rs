//! HTTP handlers for login and logout.

use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};

use crate::adapters::html::login_page;
use crate::application::handlers::LoginError;
use crate::domain::session::Flash;

use super::super::middleware::Session;
use super::super::state::GymAppState;
use super::super::views::render_page;
use super::dto::LoginForm;

pub(crate) const LOGIN_FAILED: &str = "Usuario o contraseña incorrectos.";
pub(crate) const LOGGED_OUT: &str = "Has cerrado sesión.";

/// GET /login - Render the login form.
pub async fn show_login(session: Session) -> Response {
    if session.login().await.is_some() {
        return Redirect::to("/").into_response();
    }
    render_page(&session, login_page).await.into_response()
}

/// POST /login - Test the credentials against the database.
pub async fn submit_login(
    State(state): State<GymAppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if session.login().await.is_some() {
        return Redirect::to("/").into_response();
    }

    let username = form.username.trim().to_string();
    match state.login_handler().handle(form.into()).await {
        Ok(login) => {
            tracing::info!(username = %login.username(), role = %login.role, "User logged in");
            let welcome = format!("¡Bienvenido {} (Rol: {})!", login.username(), login.role);
            session.begin_login(login).await;
            session.flash(Flash::success(welcome)).await;
            Redirect::to("/").into_response()
        }
        Err(e) => {
            match &e {
                LoginError::InvalidInput(_) => {
                    tracing::info!(error = %e, "Login form rejected")
                }
                LoginError::Rejected(_) => {
                    tracing::warn!(username = %username, error = %e, "Login failed")
                }
            }
            session.flash(Flash::danger(LOGIN_FAILED)).await;
            Redirect::to("/login").into_response()
        }
    }
}

/// GET /logout - Forget the session.
pub async fn logout(session: Session) -> Response {
    if let Some(login) = session.login().await {
        tracing::info!(username = %login.username(), "User logged out");
    }
    session.clear().await;
    session.flash(Flash::info(LOGGED_OUT)).await;
    Redirect::to("/login").into_response()
}

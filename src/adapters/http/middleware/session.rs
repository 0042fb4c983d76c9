//! Session middleware and extractors for axum.
//!
//! This module provides:
//! - `session_middleware` - Layer that resolves the signed session cookie,
//!   loads server-side session data and persists changes after the handler
//! - `Session` - Extractor giving handlers the per-request session handle
//! - `RequireLogin` - Extractor that redirects to `/login` without a login
//!
//! # Architecture
//!
//! ```text
//! Request → session_middleware → injects Session into extensions
//!                                      ↓
//!                Handler → Session / RequireLogin extractor reads from extensions
//!                                      ↓
//!           session_middleware → saves or deletes data, sets the cookie
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::{
    header::{COOKIE, SET_COOKIE},
    request::Parts,
    HeaderMap, HeaderValue, StatusCode,
};
use tokio::sync::Mutex;

use crate::adapters::session::SessionCookieSigner;
use crate::domain::foundation::SessionId;
use crate::domain::session::{DbCredentials, Flash, LoginSession, SessionData};
use crate::ports::SessionStore;

use super::super::state::GymAppState;

/// How the session cookie is named, signed and flagged.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub signer: SessionCookieSigner,
    /// Adds the `Secure` attribute.
    pub secure: bool,
}

impl CookieSettings {
    fn issue(&self, id: &SessionId) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax{}",
            self.name,
            self.signer.sign(id),
            self.secure_attr()
        )
    }

    fn expire(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
            self.name,
            self.secure_attr()
        )
    }

    fn secure_attr(&self) -> &'static str {
        if self.secure {
            "; Secure"
        } else {
            ""
        }
    }

    fn read(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.name)
            .map(|(_, value)| value.to_string())
    }
}

struct SessionState {
    id: Option<SessionId>,
    data: SessionData,
    dirty: bool,
    rotate: bool,
}

/// Per-request handle on the browser session.
///
/// Cloning shares the same state; changes are persisted by
/// `session_middleware` once the handler has produced its response.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Mutex<SessionState>>,
}

impl Session {
    fn new(loaded: Option<(SessionId, SessionData)>) -> Self {
        let (id, data) = match loaded {
            Some((id, data)) => (Some(id), data),
            None => (None, SessionData::new()),
        };
        Self {
            inner: Arc::new(Mutex::new(SessionState {
                id,
                data,
                dirty: false,
                rotate: false,
            })),
        }
    }

    /// The logged-in user, if any.
    pub async fn login(&self) -> Option<LoginSession> {
        self.inner.lock().await.data.login().cloned()
    }

    /// Credentials to open database connections with.
    pub async fn credentials(&self) -> Option<DbCredentials> {
        self.login().await.map(|login| login.credentials)
    }

    /// Stores a fresh login under a new session id.
    pub async fn begin_login(&self, login: LoginSession) {
        let mut state = self.inner.lock().await;
        state.data.set_login(login);
        state.dirty = true;
        state.rotate = true;
    }

    /// Queues a message for the next rendered page.
    pub async fn flash(&self, flash: Flash) {
        let mut state = self.inner.lock().await;
        state.data.push_flash(flash);
        state.dirty = true;
    }

    /// Removes and returns pending flashes.
    pub async fn take_flashes(&self) -> Vec<Flash> {
        let mut state = self.inner.lock().await;
        let flashes = state.data.take_flashes();
        if !flashes.is_empty() {
            state.dirty = true;
        }
        flashes
    }

    /// Forgets the login and pending flashes.
    pub async fn clear(&self) {
        let mut state = self.inner.lock().await;
        state.data.clear();
        state.dirty = true;
        state.rotate = true;
    }

    /// Writes changes to the store and returns the `Set-Cookie` value to send.
    ///
    /// A loaded id is only ever updated in place: if a concurrent request
    /// deleted it (logout), nothing is written back and the cookie expires.
    async fn commit(
        &self,
        store: &dyn SessionStore,
        cookies: &CookieSettings,
        cookie_presented: bool,
    ) -> Option<String> {
        let mut state = self.inner.lock().await;

        if !state.dirty {
            return match state.id {
                Some(id) => match store.touch(&id).await {
                    Ok(true) => None,
                    Ok(false) => Some(cookies.expire()),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to refresh session");
                        None
                    }
                },
                None if cookie_presented => Some(cookies.expire()),
                None => None,
            };
        }

        if state.rotate {
            if let Some(old) = state.id.take() {
                if let Err(e) = store.delete(&old).await {
                    tracing::warn!(error = %e, "Failed to delete rotated session");
                }
            }
        }

        if state.data.is_empty() {
            if let Some(id) = state.id.take() {
                if let Err(e) = store.delete(&id).await {
                    tracing::warn!(error = %e, "Failed to delete empty session");
                }
            }
            return cookie_presented.then(|| cookies.expire());
        }

        let current = state.id;
        let result = match current {
            Some(id) => store.update(&id, &state.data).await.map(|live| live.then_some(id)),
            None => {
                let id = SessionId::new();
                state.id = Some(id);
                store.save(&id, &state.data).await.map(|()| Some(id))
            }
        };
        match result {
            Ok(Some(id)) => Some(cookies.issue(&id)),
            Ok(None) => {
                tracing::debug!("Session ended by a concurrent request, not writing back");
                state.id = None;
                Some(cookies.expire())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save session");
                None
            }
        }
    }
}

/// Session middleware.
///
/// This middleware:
/// 1. Reads the session cookie and verifies its signature
/// 2. Loads the session data from the `SessionStore`
/// 3. Injects a `Session` handle into request extensions
/// 4. After the handler ran, persists changes and sets or expires the cookie
///
/// Tampered, unknown or expired cookies behave like no cookie at all.
/// Store failures are logged and also degrade to "no session".
pub async fn session_middleware(
    State(state): State<GymAppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookies = &state.cookies;
    let presented = cookies.read(request.headers());

    let loaded = match presented.as_deref().and_then(|v| cookies.signer.verify(v)) {
        Some(id) => match state.sessions.load(&id).await {
            Ok(Some(data)) => Some((id, data)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Session store unavailable, continuing without session");
                None
            }
        },
        None => None,
    };

    if presented.is_some() && loaded.is_none() {
        tracing::debug!("Ignoring invalid or expired session cookie");
    }

    let session = Session::new(loaded);
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    let set_cookie = session
        .commit(state.sessions.as_ref(), cookies, presented.is_some())
        .await;
    if let Some(cookie) = set_cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "Invalid session cookie header"),
        }
    }

    response
}

/// Rejection when the session layer is not installed.
#[derive(Debug)]
pub struct SessionLayerMissing;

impl IntoResponse for SessionLayerMissing {
    fn into_response(self) -> Response {
        tracing::error!("Session extractor used without session_middleware");
        (StatusCode::INTERNAL_SERVER_ERROR, "Session unavailable").into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = SessionLayerMissing;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(SessionLayerMissing)
    }
}

/// Extractor that requires a logged-in session.
///
/// Without a login the request is redirected to `/login`.
///
/// # Example
///
/// ```ignore
/// async fn members(RequireLogin { session, login }: RequireLogin) -> impl IntoResponse {
///     format!("Hello, {}!", login.username())
/// }
/// ```
#[derive(Clone)]
pub struct RequireLogin {
    pub session: Session,
    pub login: LoginSession,
}

/// Rejection for `RequireLogin`.
#[derive(Debug)]
pub enum LoginRejection {
    LoginRequired,
    SessionLayerMissing,
}

impl IntoResponse for LoginRejection {
    fn into_response(self) -> Response {
        match self {
            LoginRejection::LoginRequired => Redirect::to("/login").into_response(),
            LoginRejection::SessionLayerMissing => SessionLayerMissing.into_response(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireLogin
where
    S: Send + Sync,
{
    type Rejection = LoginRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| LoginRejection::SessionLayerMissing)?;
        let login = session.login().await.ok_or(LoginRejection::LoginRequired)?;
        Ok(RequireLogin { session, login })
    }
}

//! Shared fixtures for the HTTP integration tests.
//!
//! Builds the production router over the in-memory gym database and offers
//! a tiny cookie-keeping client on top of `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use secrecy::SecretString;
use tower::ServiceExt;

use gym_portal::adapters::http::CookieSettings;
use gym_portal::adapters::memory::{GymTable, InMemoryGymDatabase, Privilege};
use gym_portal::adapters::{
    build_router, GymAppState, InMemorySessionStore, SessionCookieSigner,
};

pub const COOKIE_NAME: &str = "gym_session";

/// Logins, roles and grants mirroring a small gym:
///
/// - `gerente` (role `rol_gerente`): reads everything, inserts members
/// - `recepcion` (role `rol_recepcion`): members and classes, inserts members
/// - `instructor` (no role): classes only
pub fn gym_database() -> InMemoryGymDatabase {
    InMemoryGymDatabase::new()
        .with_user("gerente", "gerente-pw", Some("rol_gerente"))
        .with_user("recepcion", "recepcion-pw", Some("rol_recepcion"))
        .with_user("instructor", "instructor-pw", None)
        .with_grant("rol_gerente", GymTable::Members, Privilege::Select)
        .with_grant("rol_gerente", GymTable::Members, Privilege::Insert)
        .with_grant("rol_gerente", GymTable::Classes, Privilege::Select)
        .with_grant("rol_gerente", GymTable::Payments, Privilege::Select)
        .with_grant("rol_recepcion", GymTable::Members, Privilege::Select)
        .with_grant("rol_recepcion", GymTable::Members, Privilege::Insert)
        .with_grant("rol_recepcion", GymTable::Classes, Privilege::Select)
        .with_grant("instructor", GymTable::Classes, Privilege::Select)
        .with_member("Ana", "Lopez", "ana@gym.mx", "Mensual")
        .with_member("Luis", "Perez", "luis@gym.mx", "Anual")
        .with_class("Yoga", "07:00:00", "Marta")
        .with_class("Spinning", "06:00:00", "Jorge")
        .with_payment(1, "450.00", date(2024, 3, 1), "Tarjeta")
        .with_payment(2, "4800.00", date(2024, 1, 15), "Efectivo")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Build the application router over `db`, exactly as `main` does.
pub fn build_test_app(db: &InMemoryGymDatabase) -> Router {
    let cookies = CookieSettings {
        name: COOKIE_NAME.to_string(),
        signer: SessionCookieSigner::new(SecretString::new("test-cookie-key".to_string())),
        secure: false,
    };
    let state = GymAppState::new(
        Arc::new(db.clone()),
        Arc::new(InMemorySessionStore::new(Duration::from_secs(3600))),
        cookies,
    );
    build_router(state, Duration::from_secs(30))
}

/// Collected response parts.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookies: Vec<String>,
    pub request_id: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn assert_redirect(&self, to: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(to));
    }
}

/// A browser stand-in that keeps the session cookie between requests.
pub struct TestClient {
    app: Router,
    pub cookie: Option<String>,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, body: &str) -> TestResponse {
        let request = self
            .request("POST", uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post_form(
            "/login",
            &format!("username={}&password={}", username, password),
        )
        .await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie.as_str()),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let location = headers
            .get(LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let request_id = headers
            .get("x-request-id")
            .map(|v| v.to_str().unwrap().to_string());
        let set_cookies: Vec<String> = headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();

        for cookie in &set_cookies {
            let pair = cookie.split(';').next().unwrap().trim();
            if !pair.starts_with(&format!("{}=", COOKIE_NAME)) {
                continue;
            }
            self.cookie = if cookie.contains("Max-Age=0") {
                None
            } else {
                Some(pair.to_string())
            };
        }

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            location,
            set_cookies,
            request_id,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

//! Login, logout and session handling over HTTP.

mod common;

use axum::http::StatusCode;

use common::{build_test_app, gym_database, TestClient};

#[tokio::test]
async fn protected_routes_redirect_to_login_without_session() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    for uri in ["/", "/miembros", "/clases", "/pagos", "/miembro/nuevo"] {
        let response = client.get(uri).await;
        response.assert_redirect("/login");
    }

    let response = client
        .post_form(
            "/miembro/nuevo",
            "nombre=Eva&apellido_paterno=Diaz&correo=eva@gym.mx&tipo_membresia=Mensual",
        )
        .await;
    response.assert_redirect("/login");

    assert_eq!(db.connections_opened(), 0);
    assert_eq!(db.members().len(), 2);
}

#[tokio::test]
async fn login_form_is_public() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    let response = client.get("/login").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("action=\"/login\""));
    assert!(response.set_cookies.is_empty());
}

#[tokio::test]
async fn successful_login_populates_session_and_redirects_to_dashboard() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    let response = client.login("recepcion", "recepcion-pw").await;
    response.assert_redirect("/");
    assert!(client.cookie.is_some());

    let dashboard = client.get("/").await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert!(dashboard
        .body
        .contains("¡Bienvenido recepcion (Rol: rol_recepcion)!"));
    assert!(dashboard.body.contains("<strong>rol_recepcion</strong>"));
    assert_eq!(db.open_connections(), 0);
}

#[tokio::test]
async fn login_without_role_uses_username_as_label() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    client.login("instructor", "instructor-pw").await;
    let dashboard = client.get("/").await;

    assert!(dashboard
        .body
        .contains("¡Bienvenido instructor (Rol: instructor)!"));
}

#[tokio::test]
async fn failed_login_keeps_session_empty_and_shows_error() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    let response = client.login("recepcion", "wrong").await;
    response.assert_redirect("/login");

    let form = client.get("/login").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("Usuario o contraseña incorrectos."));
    assert!(form.body.contains("flash-danger"));

    client.get("/").await.assert_redirect("/login");
}

#[tokio::test]
async fn blank_login_form_fails_without_touching_database() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    client.post_form("/login", "").await.assert_redirect("/login");

    let form = client.get("/login").await;
    assert!(form.body.contains("Usuario o contraseña incorrectos."));
    assert_eq!(db.connections_opened(), 0);
}

#[tokio::test]
async fn logged_in_user_skips_login_form() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    client.login("gerente", "gerente-pw").await;

    client.get("/login").await.assert_redirect("/");
    client
        .login("gerente", "gerente-pw")
        .await
        .assert_redirect("/");
}

#[tokio::test]
async fn login_rotates_session_cookie() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    client.login("recepcion", "wrong").await;
    let anonymous = client.cookie.clone().expect("flash session cookie");

    client.login("recepcion", "recepcion-pw").await;
    let authenticated = client.cookie.clone().expect("login session cookie");

    assert_ne!(anonymous, authenticated);
}

#[tokio::test]
async fn session_cookie_is_http_only_and_lax() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    let response = client.login("recepcion", "recepcion-pw").await;
    let cookie = response
        .set_cookies
        .iter()
        .find(|c| c.starts_with("gym_session="))
        .expect("session cookie");

    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("recepcion-pw"));
}

#[tokio::test]
async fn logout_clears_credentials() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    client.login("recepcion", "recepcion-pw").await;
    client.get("/").await;

    client.get("/logout").await.assert_redirect("/login");

    client.get("/miembros").await.assert_redirect("/login");
    // the redirect above must not have consumed the logout flash
    let form = client.get("/login").await;
    assert!(form.body.contains("Has cerrado sesión."));
    assert!(form.body.contains("flash-info"));
}

#[tokio::test]
async fn tampered_cookie_is_ignored() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    client.login("gerente", "gerente-pw").await;
    let cookie = client.cookie.clone().unwrap();

    let mut tampered = cookie.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == '0' { '1' } else { '0' });
    client.cookie = Some(tampered);

    let response = client.get("/").await;
    response.assert_redirect("/login");
    assert!(response
        .set_cookies
        .iter()
        .any(|c| c.starts_with("gym_session=;") && c.contains("Max-Age=0")));
}

#[tokio::test]
async fn forged_cookie_for_other_session_is_ignored() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    client.cookie = Some(format!(
        "gym_session={}.{}",
        uuid::Uuid::new_v4(),
        "00".repeat(32)
    ));

    client.get("/miembros").await.assert_redirect("/login");
}

#[tokio::test]
async fn flash_messages_are_shown_once() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    client.login("recepcion", "recepcion-pw").await;

    let first = client.get("/").await;
    assert!(first.body.contains("¡Bienvenido"));

    let second = client.get("/").await;
    assert_eq!(second.status, StatusCode::OK);
    assert!(!second.body.contains("¡Bienvenido"));
}

#[tokio::test]
async fn sessions_are_independent_per_browser() {
    let db = gym_database();
    let app = build_test_app(&db);
    let mut gerente = TestClient::new(app.clone());
    let mut instructor = TestClient::new(app);

    gerente.login("gerente", "gerente-pw").await;
    instructor.login("instructor", "instructor-pw").await;

    assert_eq!(gerente.get("/pagos").await.status, StatusCode::OK);
    instructor.get("/").await;
    instructor.get("/pagos").await.assert_redirect("/");
}

#[tokio::test]
async fn health_is_public_and_sessionless() {
    let db = gym_database();
    let mut client = TestClient::new(build_test_app(&db));

    let response = client.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(response.set_cookies.is_empty());
    assert!(response.request_id.is_some());
}

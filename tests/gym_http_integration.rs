//! Listing and member registration pages over HTTP.
//!
//! Authorization is decided by the grants in the in-memory database; the
//! portal only reports what the database allowed.

mod common;

use axum::http::StatusCode;
use gym_portal::adapters::memory::{GymTable, Privilege};

use common::{build_test_app, gym_database, TestClient};

async fn logged_in(db: &gym_portal::adapters::InMemoryGymDatabase, user: &str) -> TestClient {
    let mut client = TestClient::new(build_test_app(db));
    client
        .login(user, &format!("{}-pw", user))
        .await
        .assert_redirect("/");
    // consume the welcome flash
    client.get("/").await;
    client
}

#[tokio::test]
async fn members_are_listed_in_id_order() {
    let db = gym_database();
    let mut client = logged_in(&db, "recepcion").await;

    let response = client.get("/miembros").await;

    assert_eq!(response.status, StatusCode::OK);
    let ana = response.body.find("ana@gym.mx").unwrap();
    let luis = response.body.find("luis@gym.mx").unwrap();
    assert!(ana < luis);
    assert!(response.body.contains("<td>Ana Lopez</td>"));
    assert_eq!(db.open_connections(), 0);
}

#[tokio::test]
async fn classes_are_listed_by_schedule_with_instructor() {
    let db = gym_database();
    let mut client = logged_in(&db, "instructor").await;

    let response = client.get("/clases").await;

    assert_eq!(response.status, StatusCode::OK);
    let spinning = response.body.find("Spinning").unwrap();
    let yoga = response.body.find("Yoga").unwrap();
    assert!(spinning < yoga);
    assert!(response.body.contains("<td>Jorge</td>"));
}

#[tokio::test]
async fn payments_are_listed_newest_first() {
    let db = gym_database();
    let mut client = logged_in(&db, "gerente").await;

    let response = client.get("/pagos").await;

    assert_eq!(response.status, StatusCode::OK);
    let march = response.body.find("2024-03-01").unwrap();
    let january = response.body.find("2024-01-15").unwrap();
    assert!(march < january);
    assert!(response.body.contains("<td>Luis Perez</td>"));
    assert!(response.body.contains("<td>4800.00</td>"));
}

#[tokio::test]
async fn missing_select_grant_flashes_permission_error() {
    let db = gym_database();
    let mut client = logged_in(&db, "recepcion").await;

    client.get("/pagos").await.assert_redirect("/");

    let dashboard = client.get("/").await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert!(dashboard.body.contains(
        "Error de permisos: No puedes ver esta tabla (42501: permission denied for table pago)."
    ));
    assert_eq!(db.open_connections(), 0);
}

#[tokio::test]
async fn revoked_grant_takes_effect_on_next_request() {
    let db = gym_database();
    let mut client = logged_in(&db, "instructor").await;

    assert_eq!(client.get("/clases").await.status, StatusCode::OK);

    db.revoke("instructor", GymTable::Classes, Privilege::Select);
    client.get("/clases").await.assert_redirect("/");
}

#[tokio::test]
async fn changed_password_sends_user_back_to_login() {
    let db = gym_database();
    let mut client = logged_in(&db, "recepcion").await;

    db.change_password("recepcion", "rotated");

    client.get("/miembros").await.assert_redirect("/login");
    // still logged in as far as the session goes, so /login bounces to /
    client.get("/login").await.assert_redirect("/");
    let dashboard = client.get("/").await;
    assert!(dashboard.body.contains("Error de conexión. ¿Estás logueado?"));
}

#[tokio::test]
async fn unreachable_database_sends_user_back_to_login() {
    let db = gym_database();
    let mut client = logged_in(&db, "gerente").await;

    db.set_unavailable(Some("connection refused"));
    client.get("/clases").await.assert_redirect("/login");
}

#[tokio::test]
async fn member_form_renders_for_logged_in_user() {
    let db = gym_database();
    let mut client = logged_in(&db, "recepcion").await;

    let response = client.get("/miembro/nuevo").await;

    assert_eq!(response.status, StatusCode::OK);
    for field in ["nombre", "apellido_paterno", "correo", "tipo_membresia"] {
        assert!(response.body.contains(&format!("name=\"{}\"", field)));
    }
    assert_eq!(db.connections_opened(), 1);
}

#[tokio::test]
async fn creating_member_redirects_to_listing() {
    let db = gym_database();
    let mut client = logged_in(&db, "recepcion").await;

    let response = client
        .post_form(
            "/miembro/nuevo",
            "nombre=Eva&apellido_paterno=Diaz&correo=eva%40gym.mx&tipo_membresia=Mensual",
        )
        .await;
    response.assert_redirect("/miembros");

    let listing = client.get("/miembros").await;
    assert!(listing.body.contains("¡Miembro agregado exitosamente!"));
    assert!(listing.body.contains("<td>Eva Diaz</td>"));
    assert_eq!(db.members().len(), 3);
    assert_eq!(db.open_connections(), 0);
}

#[tokio::test]
async fn duplicate_email_returns_to_form_with_message() {
    let db = gym_database();
    let mut client = logged_in(&db, "recepcion").await;

    let response = client
        .post_form(
            "/miembro/nuevo",
            "nombre=Ana&apellido_paterno=Ruiz&correo=ana%40gym.mx&tipo_membresia=Anual",
        )
        .await;
    response.assert_redirect("/miembro/nuevo");

    let form = client.get("/miembro/nuevo").await;
    assert!(form
        .body
        .contains("Error: El correo &quot;ana@gym.mx&quot; ya está registrado."));
    assert_eq!(db.members().len(), 2);
}

#[tokio::test]
async fn missing_insert_grant_returns_to_form_with_message() {
    let db = gym_database();
    let mut client = logged_in(&db, "instructor").await;

    client
        .post_form(
            "/miembro/nuevo",
            "nombre=Eva&apellido_paterno=Diaz&correo=eva%40gym.mx&tipo_membresia=Mensual",
        )
        .await
        .assert_redirect("/miembro/nuevo");

    let form = client.get("/miembro/nuevo").await;
    assert!(form
        .body
        .contains("Error de permisos: ¡No tienes permiso para agregar miembros!"));
    assert_eq!(db.members().len(), 2);
}

#[tokio::test]
async fn invalid_form_is_rejected_without_database_round_trip() {
    let db = gym_database();
    let mut client = logged_in(&db, "recepcion").await;
    let before = db.connections_opened();

    let response = client
        .post_form(
            "/miembro/nuevo",
            "nombre=Eva&apellido_paterno=Diaz&correo=no-es-correo&tipo_membresia=Mensual",
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("El campo Correo no es válido."));
    assert!(response.body.contains("value=\"no-es-correo\""));
    assert_eq!(db.connections_opened(), before);

    let empty = client
        .post_form("/miembro/nuevo", "nombre=&apellido_paterno=Diaz")
        .await;
    assert_eq!(empty.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(empty.body.contains("El campo Nombre es obligatorio."));
    assert_eq!(db.connections_opened(), before);
}

#[tokio::test]
async fn database_text_is_escaped_in_pages() {
    let db = gym_database().with_member("<script>alert(1)</script>", "X", "xss@gym.mx", "Mensual");
    let mut client = logged_in(&db, "gerente").await;

    let response = client.get("/miembros").await;

    assert!(response.body.contains("&lt;script&gt;alert(1)&lt;/script&gt; X"));
    assert!(!response.body.contains("<script>alert(1)</script>"));
}

#[tokio::test]
async fn dashboard_needs_no_database_access() {
    let db = gym_database();
    let mut client = logged_in(&db, "gerente").await;
    let before = db.connections_opened();

    db.set_unavailable(Some("down"));
    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(db.connections_opened(), before);
}

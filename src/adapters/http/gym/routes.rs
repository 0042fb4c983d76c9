//! Axum router configuration for the gym pages.

use axum::{routing::get, Router};

use super::super::state::GymAppState;
use super::handlers::{
    create_member, dashboard, list_classes, list_members, list_payments, new_member_form,
};

/// Create the gym router. Every route requires a login.
///
/// # Routes
/// - `GET /` - Dashboard
/// - `GET /miembros` - Members
/// - `GET /clases` - Classes
/// - `GET /pagos` - Payments
/// - `GET /miembro/nuevo` - New member form
/// - `POST /miembro/nuevo` - Insert a member
pub fn gym_routes() -> Router<GymAppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/miembros", get(list_members))
        .route("/clases", get(list_classes))
        .route("/pagos", get(list_payments))
        .route("/miembro/nuevo", get(new_member_form).post(create_member))
}

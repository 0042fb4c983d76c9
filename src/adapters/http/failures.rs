//! Turns database errors into a flash message and a redirect.
//!
//! Data-access failures never surface as error pages: the user is sent
//! somewhere sensible with an explanation.

use axum::response::{IntoResponse, Redirect, Response};

use crate::domain::foundation::ValidationError;
use crate::domain::gym::DatabaseError;
use crate::domain::session::Flash;

use super::middleware::Session;

pub(crate) const CONNECTION_FAILED: &str = "Error de conexión. ¿Estás logueado?";

/// Message for a listing page whose statement failed.
pub(crate) fn listing_failure_message(err: &DatabaseError) -> String {
    format!(
        "Error de permisos: No puedes ver esta tabla ({}: {}).",
        err.code().unwrap_or("?????"),
        err.database_message()
    )
}

/// Message for a failed member insert.
pub(crate) fn create_member_failure_message(err: &DatabaseError, email: &str) -> String {
    match err {
        DatabaseError::UniqueViolation { .. } => {
            format!("Error: El correo \"{}\" ya está registrado.", email)
        }
        DatabaseError::PermissionDenied { .. } => {
            "Error de permisos: ¡No tienes permiso para agregar miembros!".to_string()
        }
        other => format!(
            "Error inesperado al agregar miembro: {}",
            other.database_message()
        ),
    }
}

/// Message for a rejected member form.
pub(crate) fn validation_message(err: &ValidationError) -> String {
    let label = field_label(err.field());
    match err {
        ValidationError::EmptyField { .. } => format!("El campo {} es obligatorio.", label),
        ValidationError::TooLong { max, .. } => {
            format!("El campo {} admite como máximo {} caracteres.", label, max)
        }
        ValidationError::InvalidFormat { .. } => format!("El campo {} no es válido.", label),
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "nombre" => "Nombre",
        "apellido_paterno" => "Apellido paterno",
        "correo" => "Correo",
        "tipo_membresia" => "Tipo de membresía",
        other => other,
    }
}

/// Flashes a listing failure and redirects.
///
/// Connection failures go back to the login page; statement failures go
/// to the dashboard.
pub(crate) async fn listing_failure(session: &Session, table: &str, err: DatabaseError) -> Response {
    if err.is_connection_failure() {
        tracing::warn!(table, error = %err, "Connection failed for listing");
        session.flash(Flash::danger(CONNECTION_FAILED)).await;
        return Redirect::to("/login").into_response();
    }

    tracing::info!(table, error = %err, "Listing refused by database");
    session.flash(Flash::danger(listing_failure_message(&err))).await;
    Redirect::to("/").into_response()
}

/// Flashes a member insert failure and redirects.
pub(crate) async fn create_member_failure(
    session: &Session,
    email: &str,
    err: DatabaseError,
) -> Response {
    if err.is_connection_failure() {
        tracing::warn!(error = %err, "Connection failed for member insert");
        session.flash(Flash::danger(CONNECTION_FAILED)).await;
        return Redirect::to("/login").into_response();
    }

    tracing::info!(error = %err, "Member insert refused by database");
    session
        .flash(Flash::danger(create_member_failure_message(&err, email)))
        .await;
    Redirect::to("/miembro/nuevo").into_response()
}

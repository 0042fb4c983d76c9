//! HTTP handlers for the gym pages.
//!
//! Every data page follows the same shape: require a login, run one
//! statement as the logged-in role, render or flash-and-redirect.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use crate::adapters::html::{
    classes_page, dashboard_page, members_page, new_member_page, payments_page,
    MemberFormValues,
};
use crate::domain::session::Flash;

use super::super::failures::{create_member_failure, listing_failure, validation_message};
use super::super::middleware::RequireLogin;
use super::super::state::GymAppState;
use super::super::views::render_page;
use super::dto::NewMemberForm;

pub(crate) const MEMBER_CREATED: &str = "¡Miembro agregado exitosamente!";

/// GET / - Dashboard with the role label. No database access.
pub async fn dashboard(RequireLogin { session, .. }: RequireLogin) -> Response {
    render_page(&session, dashboard_page).await.into_response()
}

/// GET /miembros - List members.
pub async fn list_members(
    State(state): State<GymAppState>,
    RequireLogin { session, login }: RequireLogin,
) -> Response {
    let result = state
        .list_members_handler()
        .handle(Some(&login.credentials))
        .await;

    match result {
        Ok(members) => render_page(&session, |ctx| members_page(ctx, &members))
            .await
            .into_response(),
        Err(e) => listing_failure(&session, "miembro", e).await,
    }
}

/// GET /clases - List classes with their instructors.
pub async fn list_classes(
    State(state): State<GymAppState>,
    RequireLogin { session, login }: RequireLogin,
) -> Response {
    let result = state
        .list_classes_handler()
        .handle(Some(&login.credentials))
        .await;

    match result {
        Ok(classes) => render_page(&session, |ctx| classes_page(ctx, &classes))
            .await
            .into_response(),
        Err(e) => listing_failure(&session, "clase", e).await,
    }
}

/// GET /pagos - List payments, newest first.
pub async fn list_payments(
    State(state): State<GymAppState>,
    RequireLogin { session, login }: RequireLogin,
) -> Response {
    let result = state
        .list_payments_handler()
        .handle(Some(&login.credentials))
        .await;

    match result {
        Ok(payments) => render_page(&session, |ctx| payments_page(ctx, &payments))
            .await
            .into_response(),
        Err(e) => listing_failure(&session, "pago", e).await,
    }
}

/// GET /miembro/nuevo - Empty member form.
pub async fn new_member_form(RequireLogin { session, .. }: RequireLogin) -> Response {
    render_page(&session, |ctx| {
        new_member_page(ctx, &MemberFormValues::default())
    })
    .await
    .into_response()
}

/// POST /miembro/nuevo - Insert a member as the logged-in role.
///
/// Invalid forms are redisplayed with the entered values and never reach
/// the database.
pub async fn create_member(
    State(state): State<GymAppState>,
    RequireLogin { session, login }: RequireLogin,
    Form(form): Form<NewMemberForm>,
) -> Response {
    let member = match form.validate() {
        Ok(member) => member,
        Err(e) => {
            session.flash(Flash::danger(validation_message(&e))).await;
            let page = render_page(&session, |ctx| new_member_page(ctx, &form.values())).await;
            return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
        }
    };

    let result = state
        .create_member_handler()
        .handle(Some(&login.credentials), &member)
        .await;

    match result {
        Ok(()) => {
            tracing::info!(username = %login.username(), "Member created");
            session.flash(Flash::success(MEMBER_CREATED)).await;
            Redirect::to("/miembros").into_response()
        }
        Err(e) => create_member_failure(&session, member.email(), e).await,
    }
}

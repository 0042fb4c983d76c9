//! Glue between the session and the HTML pages.

use axum::response::Html;

use crate::adapters::html::PageContext;

use super::middleware::Session;

/// Renders a page with the session's login header, consuming pending flashes.
pub(crate) async fn render_page<F>(session: &Session, build: F) -> Html<String>
where
    F: FnOnce(&PageContext<'_>) -> String,
{
    let login = session.login().await;
    let flashes = session.take_flashes().await;

    let ctx = PageContext {
        username: login.as_ref().map(|l| l.username()),
        role: login.as_ref().map(|l| l.role.as_str()),
        flashes: &flashes,
    };
    Html(build(&ctx))
}

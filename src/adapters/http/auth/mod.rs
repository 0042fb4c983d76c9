//! Login and logout endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::LoginForm;
pub use routes::auth_routes;

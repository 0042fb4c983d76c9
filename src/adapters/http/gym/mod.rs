//! Dashboard, listings and member registration.

mod dto;
mod handlers;
mod routes;

pub use dto::NewMemberForm;
pub use routes::gym_routes;

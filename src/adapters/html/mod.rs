//! HTML page rendering.
//!
//! Pages are plain strings built from a shared layout. Every value that
//! comes from the user or the database goes through [`html_escape`].

mod layout;
mod pages;

pub use layout::{html_escape, PageContext};
pub use pages::{
    classes_page, dashboard_page, login_page, members_page, new_member_page, payments_page,
    MemberFormValues,
};

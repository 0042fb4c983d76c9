//! Form types for the login endpoint.

use serde::Deserialize;

use crate::application::handlers::LoginCommand;

/// Login form body.
///
/// Missing fields deserialize as empty strings and are rejected by the
/// login handler, so a bad form never produces a 422.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl From<LoginForm> for LoginCommand {
    fn from(form: LoginForm) -> Self {
        LoginCommand {
            username: form.username,
            password: form.password,
        }
    }
}

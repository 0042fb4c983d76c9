//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::{
    CreateMemberHandler, ListClassesHandler, ListMembersHandler, ListPaymentsHandler,
    LoginHandler,
};
use crate::ports::{DatabaseConnector, SessionStore};

use super::middleware::CookieSettings;

/// Shared application state containing all dependencies.
///
/// Cloned for each request; dependencies are Arc-wrapped.
#[derive(Clone)]
pub struct GymAppState {
    pub connector: Arc<dyn DatabaseConnector>,
    pub sessions: Arc<dyn SessionStore>,
    pub cookies: CookieSettings,
}

impl GymAppState {
    pub fn new(
        connector: Arc<dyn DatabaseConnector>,
        sessions: Arc<dyn SessionStore>,
        cookies: CookieSettings,
    ) -> Self {
        Self {
            connector,
            sessions,
            cookies,
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.connector.clone())
    }

    pub fn list_members_handler(&self) -> ListMembersHandler {
        ListMembersHandler::new(self.connector.clone())
    }

    pub fn list_classes_handler(&self) -> ListClassesHandler {
        ListClassesHandler::new(self.connector.clone())
    }

    pub fn list_payments_handler(&self) -> ListPaymentsHandler {
        ListPaymentsHandler::new(self.connector.clone())
    }

    pub fn create_member_handler(&self) -> CreateMemberHandler {
        CreateMemberHandler::new(self.connector.clone())
    }
}

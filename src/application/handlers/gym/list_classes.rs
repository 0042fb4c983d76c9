//! ListClassesHandler - Query handler for the class schedule.

use std::sync::Arc;

use crate::domain::gym::{ClassSession, DatabaseError};
use crate::domain::session::DbCredentials;
use crate::ports::DatabaseConnector;

/// Handler for listing classes with their instructors.
pub struct ListClassesHandler {
    connector: Arc<dyn DatabaseConnector>,
}

impl ListClassesHandler {
    pub fn new(connector: Arc<dyn DatabaseConnector>) -> Self {
        Self { connector }
    }

    pub async fn handle(
        &self,
        credentials: Option<&DbCredentials>,
    ) -> Result<Vec<ClassSession>, DatabaseError> {
        let mut conn = self.connector.connect(credentials).await?;
        let result = conn.list_classes().await;
        conn.close().await;
        result
    }
}

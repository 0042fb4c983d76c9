//! ListMembersHandler - Query handler for the member listing.

use std::sync::Arc;

use crate::domain::gym::{DatabaseError, Member};
use crate::domain::session::DbCredentials;
use crate::ports::DatabaseConnector;

/// Handler for listing members under the session's role.
pub struct ListMembersHandler {
    connector: Arc<dyn DatabaseConnector>,
}

impl ListMembersHandler {
    pub fn new(connector: Arc<dyn DatabaseConnector>) -> Self {
        Self { connector }
    }

    pub async fn handle(
        &self,
        credentials: Option<&DbCredentials>,
    ) -> Result<Vec<Member>, DatabaseError> {
        let mut conn = self.connector.connect(credentials).await?;
        let result = conn.list_members().await;
        conn.close().await;
        result
    }
}

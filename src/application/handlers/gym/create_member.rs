//! CreateMemberHandler - Command handler for registering a member.

use std::sync::Arc;

use crate::domain::gym::{DatabaseError, NewMember};
use crate::domain::session::DbCredentials;
use crate::ports::DatabaseConnector;

/// Handler for inserting a member under the session's role.
pub struct CreateMemberHandler {
    connector: Arc<dyn DatabaseConnector>,
}

impl CreateMemberHandler {
    pub fn new(connector: Arc<dyn DatabaseConnector>) -> Self {
        Self { connector }
    }

    pub async fn handle(
        &self,
        credentials: Option<&DbCredentials>,
        member: &NewMember,
    ) -> Result<(), DatabaseError> {
        let mut conn = self.connector.connect(credentials).await?;
        let result = conn.insert_member(member).await;
        conn.close().await;
        result
    }
}

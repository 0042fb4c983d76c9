//! ListPaymentsHandler - Query handler for the payment ledger.

use std::sync::Arc;

use crate::domain::gym::{DatabaseError, Payment};
use crate::domain::session::DbCredentials;
use crate::ports::DatabaseConnector;

/// Handler for listing payments, newest first.
pub struct ListPaymentsHandler {
    connector: Arc<dyn DatabaseConnector>,
}

impl ListPaymentsHandler {
    pub fn new(connector: Arc<dyn DatabaseConnector>) -> Self {
        Self { connector }
    }

    pub async fn handle(
        &self,
        credentials: Option<&DbCredentials>,
    ) -> Result<Vec<Payment>, DatabaseError> {
        let mut conn = self.connector.connect(credentials).await?;
        let result = conn.list_payments().await;
        conn.close().await;
        result
    }
}

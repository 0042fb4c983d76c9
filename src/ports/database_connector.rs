//! Database connector port.
//!
//! Opens connections under the logged-in user's own database role. The
//! portal holds no service credential: whatever the role may see or change
//! is exactly what the user may see or change.
//!
//! # Contract
//!
//! - Every `connect` call opens a new physical connection.
//! - The caller closes the connection with [`GymConnection::close`].
//! - Absent credentials fail with `DatabaseError::NotLoggedIn` without
//!   touching the network.
//! - Credentials refused by the server fail with
//!   `DatabaseError::ConnectionRejected`.

use async_trait::async_trait;

use crate::domain::foundation::Username;
use crate::domain::gym::{ClassSession, DatabaseError, Member, NewMember, Payment};
use crate::domain::session::DbCredentials;

/// Opens per-request connections.
#[async_trait]
pub trait DatabaseConnector: Send + Sync {
    /// Open a connection authenticated as `credentials`.
    ///
    /// # Errors
    ///
    /// - `NotLoggedIn` if `credentials` is `None`
    /// - `ConnectionRejected` if the database refuses the login
    /// - `Unavailable` if the database cannot be reached
    async fn connect(
        &self,
        credentials: Option<&DbCredentials>,
    ) -> Result<Box<dyn GymConnection>, DatabaseError>;
}

/// One open connection, limited to the portal's fixed statements.
#[async_trait]
pub trait GymConnection: Send {
    /// First role granted to `username`, if any.
    async fn primary_role(&mut self, username: &Username) -> Result<Option<String>, DatabaseError>;

    /// All members ordered by identifier.
    async fn list_members(&mut self) -> Result<Vec<Member>, DatabaseError>;

    /// All classes with their instructor, ordered by schedule.
    async fn list_classes(&mut self) -> Result<Vec<ClassSession>, DatabaseError>;

    /// All payments with the member's name, newest first.
    async fn list_payments(&mut self) -> Result<Vec<Payment>, DatabaseError>;

    /// Insert a member inside a transaction.
    ///
    /// On error the transaction is rolled back before returning.
    async fn insert_member(&mut self, member: &NewMember) -> Result<(), DatabaseError>;

    /// Close the physical connection.
    ///
    /// Errors while closing are logged by the implementation; later calls on
    /// this connection fail with `DatabaseError::Closed`.
    async fn close(&mut self);
}

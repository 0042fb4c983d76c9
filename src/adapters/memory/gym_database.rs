//! In-memory gym database for testing.
//!
//! Implements the `DatabaseConnector` and `GymConnection` ports with
//! login passwords, role memberships and per-table grants, so tests can
//! exercise database-enforced authorization without PostgreSQL.
//!
//! # Example
//!
//! ```ignore
//! use gym_portal::adapters::memory::{GymTable, InMemoryGymDatabase, Privilege};
//!
//! let db = InMemoryGymDatabase::new()
//!     .with_user("recepcion", "secret", Some("rol_recepcion"))
//!     .with_grant("rol_recepcion", GymTable::Members, Privilege::Select)
//!     .with_member("Ana", "Lopez", "ana@gym.mx", "Mensual");
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::Username;
use crate::domain::gym::{sqlstate, ClassSession, DatabaseError, Member, NewMember, Payment};
use crate::domain::session::DbCredentials;
use crate::ports::{DatabaseConnector, GymConnection};

/// Name of the unique constraint on member emails.
pub const MEMBER_EMAIL_CONSTRAINT: &str = "miembro_correo_key";

/// Tables the portal reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GymTable {
    Members,
    Classes,
    Payments,
}

impl GymTable {
    fn table_name(&self) -> &'static str {
        match self {
            GymTable::Members => "miembro",
            GymTable::Classes => "clase",
            GymTable::Payments => "pago",
        }
    }
}

/// Table privileges the portal needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Privilege {
    Select,
    Insert,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    roles: Vec<String>,
}

#[derive(Debug, Clone)]
struct MemberRecord {
    id: i32,
    first_name: String,
    paternal_surname: String,
    email: String,
    membership_type: String,
}

impl MemberRecord {
    fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.paternal_surname)
    }

    fn to_member(&self) -> Member {
        Member {
            id: self.id,
            full_name: self.full_name(),
            email: self.email.clone(),
            membership_type: self.membership_type.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct PaymentRecord {
    member_id: i32,
    amount: String,
    paid_on: NaiveDate,
    method: String,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Account>,
    grants: HashSet<(String, GymTable, Privilege)>,
    members: Vec<MemberRecord>,
    classes: Vec<ClassSession>,
    payments: Vec<PaymentRecord>,
    role_lookup_error: Option<DatabaseError>,
    unavailable: Option<String>,
    connections_opened: usize,
    open_connections: usize,
}

impl State {
    fn has_privilege(&self, username: &str, table: GymTable, privilege: Privilege) -> bool {
        let Some(account) = self.accounts.get(username) else {
            return false;
        };
        std::iter::once(username)
            .chain(account.roles.iter().map(String::as_str))
            .any(|grantee| {
                self.grants
                    .contains(&(grantee.to_string(), table, privilege))
            })
    }

    fn require(
        &self,
        username: &str,
        table: GymTable,
        privilege: Privilege,
    ) -> Result<(), DatabaseError> {
        if self.has_privilege(username, table, privilege) {
            Ok(())
        } else {
            Err(DatabaseError::permission_denied(format!(
                "permission denied for table {}",
                table.table_name()
            )))
        }
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory stand-in for the gym's PostgreSQL database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGymDatabase {
    state: Arc<Mutex<State>>,
}

impl InMemoryGymDatabase {
    /// Creates an empty database with no logins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a login, optionally member of one role.
    pub fn with_user(self, username: &str, password: &str, role: Option<&str>) -> Self {
        lock(&self.state).accounts.insert(
            username.to_string(),
            Account {
                password: password.to_string(),
                roles: role.map(|r| vec![r.to_string()]).unwrap_or_default(),
            },
        );
        self
    }

    /// Grants a privilege to a login or role.
    pub fn with_grant(self, grantee: &str, table: GymTable, privilege: Privilege) -> Self {
        lock(&self.state)
            .grants
            .insert((grantee.to_string(), table, privilege));
        self
    }

    /// Adds a member row. Identifiers are assigned sequentially from 1.
    pub fn with_member(
        self,
        first_name: &str,
        paternal_surname: &str,
        email: &str,
        membership_type: &str,
    ) -> Self {
        {
            let mut state = lock(&self.state);
            let id = state.members.len() as i32 + 1;
            state.members.push(MemberRecord {
                id,
                first_name: first_name.to_string(),
                paternal_surname: paternal_surname.to_string(),
                email: email.to_string(),
                membership_type: membership_type.to_string(),
            });
        }
        self
    }

    /// Adds a class taught by `instructor`.
    pub fn with_class(self, name: &str, schedule: &str, instructor: &str) -> Self {
        lock(&self.state).classes.push(ClassSession {
            name: name.to_string(),
            schedule: schedule.to_string(),
            instructor: instructor.to_string(),
        });
        self
    }

    /// Adds a payment made by member `member_id`.
    pub fn with_payment(
        self,
        member_id: i32,
        amount: &str,
        paid_on: NaiveDate,
        method: &str,
    ) -> Self {
        lock(&self.state).payments.push(PaymentRecord {
            member_id,
            amount: amount.to_string(),
            paid_on,
            method: method.to_string(),
        });
        self
    }

    /// Makes every role lookup fail with `error`.
    pub fn with_role_lookup_error(self, error: DatabaseError) -> Self {
        lock(&self.state).role_lookup_error = Some(error);
        self
    }

    /// Makes every connect fail as if the server were down.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        lock(&self.state).unavailable = reason.map(str::to_string);
    }

    /// Changes a login's password, invalidating sessions that hold the old one.
    pub fn change_password(&self, username: &str, password: &str) {
        if let Some(account) = lock(&self.state).accounts.get_mut(username) {
            account.password = password.to_string();
        }
    }

    /// Revokes a previously granted privilege.
    pub fn revoke(&self, grantee: &str, table: GymTable, privilege: Privilege) {
        lock(&self.state)
            .grants
            .remove(&(grantee.to_string(), table, privilege));
    }

    /// Current member rows, ordered by identifier.
    pub fn members(&self) -> Vec<Member> {
        let state = lock(&self.state);
        let mut members: Vec<Member> = state.members.iter().map(MemberRecord::to_member).collect();
        members.sort_by_key(|m| m.id);
        members
    }

    /// Total number of successful connects.
    pub fn connections_opened(&self) -> usize {
        lock(&self.state).connections_opened
    }

    /// Connections opened but not yet closed.
    pub fn open_connections(&self) -> usize {
        lock(&self.state).open_connections
    }
}

#[async_trait]
impl DatabaseConnector for InMemoryGymDatabase {
    async fn connect(
        &self,
        credentials: Option<&DbCredentials>,
    ) -> Result<Box<dyn GymConnection>, DatabaseError> {
        let credentials = credentials.ok_or(DatabaseError::NotLoggedIn)?;
        let username = credentials.username().as_str();

        let mut state = lock(&self.state);
        if let Some(reason) = &state.unavailable {
            return Err(DatabaseError::Unavailable(reason.clone()));
        }

        let accepted = state
            .accounts
            .get(username)
            .is_some_and(|account| account.password == credentials.expose_password());
        if !accepted {
            return Err(DatabaseError::ConnectionRejected {
                code: Some(sqlstate::INVALID_PASSWORD.to_string()),
                message: format!("password authentication failed for user \"{}\"", username),
            });
        }

        state.connections_opened += 1;
        state.open_connections += 1;

        Ok(Box::new(InMemoryGymConnection {
            state: Arc::clone(&self.state),
            username: username.to_string(),
            closed: false,
        }))
    }
}

/// A connection to [`InMemoryGymDatabase`] acting as one login.
#[derive(Debug)]
pub struct InMemoryGymConnection {
    state: Arc<Mutex<State>>,
    username: String,
    closed: bool,
}

impl InMemoryGymConnection {
    fn live_state(&self) -> Result<MutexGuard<'_, State>, DatabaseError> {
        if self.closed {
            return Err(DatabaseError::Closed);
        }
        Ok(lock(&self.state))
    }
}

#[async_trait]
impl GymConnection for InMemoryGymConnection {
    async fn primary_role(&mut self, username: &Username) -> Result<Option<String>, DatabaseError> {
        let state = self.live_state()?;
        if let Some(error) = &state.role_lookup_error {
            return Err(error.clone());
        }
        Ok(state
            .accounts
            .get(username.as_str())
            .and_then(|account| account.roles.first().cloned()))
    }

    async fn list_members(&mut self) -> Result<Vec<Member>, DatabaseError> {
        let state = self.live_state()?;
        state.require(&self.username, GymTable::Members, Privilege::Select)?;

        let mut members: Vec<Member> = state.members.iter().map(MemberRecord::to_member).collect();
        members.sort_by_key(|m| m.id);
        Ok(members)
    }

    async fn list_classes(&mut self) -> Result<Vec<ClassSession>, DatabaseError> {
        let state = self.live_state()?;
        state.require(&self.username, GymTable::Classes, Privilege::Select)?;

        let mut classes = state.classes.clone();
        classes.sort_by(|a, b| a.schedule.cmp(&b.schedule));
        Ok(classes)
    }

    async fn list_payments(&mut self) -> Result<Vec<Payment>, DatabaseError> {
        let state = self.live_state()?;
        state.require(&self.username, GymTable::Payments, Privilege::Select)?;
        state.require(&self.username, GymTable::Members, Privilege::Select)?;

        let mut payments: Vec<Payment> = state
            .payments
            .iter()
            .filter_map(|payment| {
                state
                    .members
                    .iter()
                    .find(|m| m.id == payment.member_id)
                    .map(|member| Payment {
                        member_name: member.full_name(),
                        amount: payment.amount.clone(),
                        paid_on: Some(payment.paid_on),
                        method: payment.method.clone(),
                    })
            })
            .collect();
        payments.sort_by(|a, b| b.paid_on.cmp(&a.paid_on));
        Ok(payments)
    }

    async fn insert_member(&mut self, member: &NewMember) -> Result<(), DatabaseError> {
        let mut state = self.live_state()?;
        state.require(&self.username, GymTable::Members, Privilege::Insert)?;

        if state.members.iter().any(|m| m.email == member.email()) {
            return Err(DatabaseError::UniqueViolation {
                constraint: Some(MEMBER_EMAIL_CONSTRAINT.to_string()),
                message: format!(
                    "duplicate key value violates unique constraint \"{}\"",
                    MEMBER_EMAIL_CONSTRAINT
                ),
            });
        }

        let id = state.members.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        state.members.push(MemberRecord {
            id,
            first_name: member.first_name().to_string(),
            paternal_surname: member.paternal_surname().to_string(),
            email: member.email().to_string(),
            membership_type: member.membership_type().to_string(),
        });
        Ok(())
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let mut state = lock(&self.state);
        state.open_connections = state.open_connections.saturating_sub(1);
    }
}

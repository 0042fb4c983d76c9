//! PostgreSQL implementation of GymConnection.
//!
//! Wraps one `PgConnection` opened as the logged-in user. Every statement
//! runs under that role, so PostgreSQL grants decide what succeeds.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Connection, PgConnection};

use crate::domain::foundation::Username;
use crate::domain::gym::{ClassSession, DatabaseError, Member, NewMember, Payment};
use crate::ports::GymConnection;

use super::errors::map_sqlx_error;

const PRIMARY_ROLE_SQL: &str = r#"
    SELECT r.rolname
    FROM pg_roles r
    JOIN pg_auth_members m ON m.roleid = r.oid
    JOIN pg_user u ON m.member = u.usesysid
    WHERE u.usename = $1
    ORDER BY r.rolname
    LIMIT 1
"#;

const LIST_MEMBERS_SQL: &str = r#"
    SELECT id_miembro::int4 AS id, full_name::text AS full_name,
           correo::text AS email, tipo_membresia::text AS membership_type
    FROM miembro
    ORDER BY id_miembro
"#;

const LIST_CLASSES_SQL: &str = r#"
    SELECT c.nombre::text AS name, c.horario::text AS schedule, i.nombre::text AS instructor
    FROM clase c
    JOIN instructor i ON c.instructor_id = i.id_instructor
    ORDER BY c.horario
"#;

const LIST_PAYMENTS_SQL: &str = r#"
    SELECT m.full_name::text AS member_name, p.monto::text AS amount,
           p.fecha_pago::date AS paid_on, p.metodo_pago::text AS method
    FROM pago p
    JOIN miembro m ON p.miembro_id = m.id_miembro
    ORDER BY p.fecha_pago DESC
"#;

const INSERT_MEMBER_SQL: &str = r#"
    INSERT INTO miembro (nombre, apellido_paterno, correo, tipo_membresia)
    VALUES ($1, $2, $3, $4)
"#;

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: i32,
    full_name: Option<String>,
    email: Option<String>,
    membership_type: Option<String>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            membership_type: row.membership_type.unwrap_or_default(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClassRow {
    name: Option<String>,
    schedule: Option<String>,
    instructor: Option<String>,
}

impl From<ClassRow> for ClassSession {
    fn from(row: ClassRow) -> Self {
        Self {
            name: row.name.unwrap_or_default(),
            schedule: row.schedule.unwrap_or_default(),
            instructor: row.instructor.unwrap_or_default(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    member_name: Option<String>,
    amount: Option<String>,
    paid_on: Option<NaiveDate>,
    method: Option<String>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            member_name: row.member_name.unwrap_or_default(),
            amount: row.amount.unwrap_or_default(),
            paid_on: row.paid_on,
            method: row.method.unwrap_or_default(),
        }
    }
}

/// A connection authenticated as one portal user.
pub struct PostgresGymConnection {
    conn: Option<PgConnection>,
    username: String,
}

impl PostgresGymConnection {
    pub(crate) fn new(conn: PgConnection, username: impl Into<String>) -> Self {
        Self {
            conn: Some(conn),
            username: username.into(),
        }
    }

    fn live(&mut self) -> Result<&mut PgConnection, DatabaseError> {
        self.conn.as_mut().ok_or(DatabaseError::Closed)
    }
}

#[async_trait]
impl GymConnection for PostgresGymConnection {
    async fn primary_role(&mut self, username: &Username) -> Result<Option<String>, DatabaseError> {
        let conn = self.live()?;
        let role: Option<(String,)> = sqlx::query_as(PRIMARY_ROLE_SQL)
            .bind(username.as_str())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(role.map(|(name,)| name))
    }

    async fn list_members(&mut self) -> Result<Vec<Member>, DatabaseError> {
        let conn = self.live()?;
        let rows: Vec<MemberRow> = sqlx::query_as(LIST_MEMBERS_SQL)
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn list_classes(&mut self) -> Result<Vec<ClassSession>, DatabaseError> {
        let conn = self.live()?;
        let rows: Vec<ClassRow> = sqlx::query_as(LIST_CLASSES_SQL)
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ClassSession::from).collect())
    }

    async fn list_payments(&mut self) -> Result<Vec<Payment>, DatabaseError> {
        let conn = self.live()?;
        let rows: Vec<PaymentRow> = sqlx::query_as(LIST_PAYMENTS_SQL)
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn insert_member(&mut self, member: &NewMember) -> Result<(), DatabaseError> {
        let conn = self.live()?;
        let mut tx = conn.begin().await.map_err(map_sqlx_error)?;

        let inserted = sqlx::query(INSERT_MEMBER_SQL)
            .bind(member.first_name())
            .bind(member.paternal_surname())
            .bind(member.email())
            .bind(member.membership_type())
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => tx.commit().await.map_err(map_sqlx_error),
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback after failed insert failed");
                }
                Err(map_sqlx_error(e))
            }
        }
    }

    async fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = conn.close().await {
                tracing::warn!(username = %self.username, error = %e, "Failed to close database connection");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_member_columns_become_empty_text() {
        let member = Member::from(MemberRow {
            id: 7,
            full_name: None,
            email: None,
            membership_type: None,
        });
        assert_eq!(member.id, 7);
        assert_eq!(member.email, "");
        assert_eq!(member.full_name, "");
    }

    #[test]
    fn class_without_instructor_name_still_lists() {
        let class = ClassSession::from(ClassRow {
            name: Some("Yoga".to_string()),
            schedule: None,
            instructor: None,
        });
        assert_eq!(class.name, "Yoga");
        assert_eq!(class.instructor, "");
    }

    #[test]
    fn payment_without_date_or_amount_still_lists() {
        let payment = Payment::from(PaymentRow {
            member_name: Some("Ana Lopez".to_string()),
            amount: None,
            paid_on: None,
            method: Some("Efectivo".to_string()),
        });
        assert_eq!(payment.member_name, "Ana Lopez");
        assert_eq!(payment.amount, "");
        assert_eq!(payment.paid_on, None);
    }
}

//! Payment rows.

use chrono::NaiveDate;
use serde::Serialize;

/// A payment joined with the paying member's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub member_name: String,
    /// Amount exactly as the database formats its numeric value.
    pub amount: String,
    /// `None` when the database has no date for the payment.
    pub paid_on: Option<NaiveDate>,
    pub method: String,
}

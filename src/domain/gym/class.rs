//! Scheduled class rows.

use serde::Serialize;

/// A class joined with the instructor who teaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSession {
    pub name: String,
    /// Schedule as stored by the database, rendered verbatim.
    pub schedule: String,
    pub instructor: String,
}

//! Gym module - rows read from and written to the gym schema.
//!
//! The portal does not own the schema; these types mirror the columns of
//! the fixed statements it runs.

mod class;
mod errors;
mod member;
mod payment;

pub use class::ClassSession;
pub use errors::{sqlstate, DatabaseError};
pub use member::{Member, NewMember, MAX_FIELD_LEN};
pub use payment::Payment;

//! In-memory adapters.
//!
//! - `gym_database` - `DatabaseConnector` backed by in-process tables and
//!   grants, used by tests

mod gym_database;

pub use gym_database::{
    GymTable, InMemoryGymConnection, InMemoryGymDatabase, Privilege, MEMBER_EMAIL_CONSTRAINT,
};

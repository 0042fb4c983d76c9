//! Gym Portal - Members, classes and payments with database-role authorization
//!
//! Every page runs its statement on a connection opened with the logged-in
//! user's own PostgreSQL credentials, so the database's grants decide what
//! each user can see and change.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

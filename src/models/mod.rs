//! Data models
//!
//! Row structs map the SQLite schema in `migrations/`; `*Row` structs carry
//! the joined names of related records; `*Fields` structs are validated
//! form values ready to be written.

pub mod analytics;
pub mod auth;
pub mod driver;
pub mod fuel_log;
pub mod maintenance_log;
pub mod trip;
pub mod user;
pub mod vehicle;

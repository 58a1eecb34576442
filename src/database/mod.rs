//! Database module
//!
//! Pool creation and schema migrations for the SQLite store.

pub mod connection;

pub use connection::{in_memory_pool, DatabaseConnection};

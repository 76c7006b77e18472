//! Database module
//!
//! Handles SQLite connections, migrations and the seed catalog.

pub mod connection;
pub mod migrations;
pub mod seed;

pub use connection::{connect, Database, DbError, DbResult};
pub use migrations::BootstrapReport;

//! Database migrations
//!
//! Schema creation and the one-time seed step.

use rusqlite::{Connection, TransactionBehavior};
use tracing::info;

use super::connection::DbResult;
use super::seed;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Outcome of a bootstrap run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Schema version after the run
    pub schema_version: i32,
    /// Whether the seed catalog was inserted during this run
    pub seeded: bool,
}

/// Run all migrations to bring the database up to the current schema version.
///
/// Returns true if any migration was applied.
pub fn run_migrations(conn: &Connection) -> DbResult<bool> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        info!(version = 1, "Applied migration");
    }

    Ok(current_version < SCHEMA_VERSION)
}

/// Migration v1: products table.
///
/// `IF NOT EXISTS` lets a file that already has a products table but no
/// migration ledger be adopted as-is.
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            cost REAL NOT NULL,
            qty INTEGER DEFAULT 0
        );
        "#,
    )?;

    Ok(())
}

/// Get the current schema version (0 for a database with no ledger)
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let has_ledger: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations')",
        [],
        |row| row.get(0),
    )?;
    if !has_ledger {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Migrate and seed in a single transaction.
///
/// The seed catalog is only written when this run created the schema and
/// the products table is still empty. The write lock is taken up front so
/// concurrent bootstraps against a new file serialize on it.
pub fn bootstrap(conn: &mut Connection) -> DbResult<BootstrapReport> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let applied = run_migrations(&tx)?;
    let seeded = if applied { seed::seed_if_empty(&tx)? } else { false };
    let schema_version = get_schema_version(&tx)?;

    tx.commit()?;

    info!(schema_version, seeded, "Database bootstrap complete");
    Ok(BootstrapReport {
        schema_version,
        seeded,
    })
}

//! Database connection management
//!
//! Provides SQLite connection pooling plus the single-connection `connect`
//! entry point that bootstraps a brand new database file.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;
use tracing::{debug, info};

use super::migrations::{self, BootstrapReport};

/// Default number of pooled connections
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// How long a connection waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database error types
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Open a single connection to the database file at `path`.
///
/// When no file exists yet, the file is created and the schema and seed
/// catalog are written and committed before returning. An existing file is
/// opened as-is, without any schema verification.
pub fn connect<P: AsRef<Path>>(path: P) -> DbResult<Connection> {
    let path = path.as_ref();
    let exists = path.exists();

    let mut conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;

    if !exists {
        info!(path = %path.display(), "Creating new product database");
        migrations::bootstrap(&mut conn)?;
    }

    Ok(conn)
}

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl Database {
    /// Create a new database connection pool with the default size
    pub fn new<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::with_pool_size(path, DEFAULT_POOL_SIZE)
    }

    /// Create a new database connection pool holding at most `max_size` connections
    pub fn with_pool_size<P: AsRef<Path>>(path: P, max_size: u32) -> DbResult<Self> {
        debug!(path = %path.as_ref().display(), max_size, "Opening connection pool");

        let manager = SqliteConnectionManager::file(path)
            .with_flags(
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI,
            )
            .with_init(|conn| {
                // Busy handler first: switching to WAL needs a lock
                conn.busy_timeout(BUSY_TIMEOUT)?;
                conn.execute_batch(
                    "PRAGMA foreign_keys = ON;
                     PRAGMA journal_mode = WAL;
                     PRAGMA synchronous = NORMAL;",
                )?;
                Ok(())
            });

        let pool = Pool::builder().max_size(max_size.max(1)).build(manager)?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get a connection from the pool
    pub fn get_conn(&self) -> DbResult<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Execute a closure with a database connection
    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.get_conn()?;
        f(&conn)
    }

    /// Execute a closure with a mutable database connection (for transactions)
    pub fn with_conn_mut<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&mut Connection) -> DbResult<T>,
    {
        let mut conn = self.get_conn()?;
        f(&mut conn)
    }

    /// Run migrations and, if the schema was just created, insert the seed catalog.
    ///
    /// Safe to call on every startup: an up-to-date database is left untouched.
    pub fn bootstrap(&self) -> DbResult<BootstrapReport> {
        self.with_conn_mut(migrations::bootstrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fetch_all_products;

    #[test]
    fn test_connect_creates_and_seeds_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.db");

        let conn = connect(&path).unwrap();
        assert!(path.exists());

        let products = fetch_all_products(&conn).unwrap();
        assert_eq!(products.len(), 20);
    }

    #[test]
    fn test_connect_does_not_reseed_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.db");

        {
            let conn = connect(&path).unwrap();
            conn.execute("DELETE FROM products WHERE id = 1", []).unwrap();
        }

        let conn = connect(&path).unwrap();
        assert_eq!(fetch_all_products(&conn).unwrap().len(), 19);
    }

    #[test]
    fn test_connect_opens_existing_file_without_schema_check() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let conn = connect(file.path()).unwrap();
        assert!(fetch_all_products(&conn).is_err());
    }

    #[test]
    fn test_pool_bootstrap_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("products.db")).unwrap();

        let first = db.bootstrap().unwrap();
        assert!(first.seeded);
        assert_eq!(first.schema_version, 1);

        let second = db.bootstrap().unwrap();
        assert!(!second.seeded);

        let count: i64 = db
            .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(count, 20);
    }

    #[test]
    fn test_pooled_connections_get_busy_timeout_and_wal() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::with_pool_size(dir.path().join("products.db"), 2).unwrap();

        let (timeout_ms, journal_mode): (i64, String) = db
            .with_conn(|conn| {
                let timeout = conn.query_row("PRAGMA busy_timeout", [], |row| row.get(0))?;
                let mode = conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))?;
                Ok((timeout, mode))
            })
            .unwrap();
        assert_eq!(timeout_ms, BUSY_TIMEOUT.as_millis() as i64);
        assert_eq!(journal_mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_concurrent_bootstraps_seed_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.db");

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let db = Database::with_pool_size(&path, 1).unwrap();
                    db.bootstrap().unwrap()
                })
            })
            .collect();

        let reports: Vec<BootstrapReport> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(reports.iter().filter(|r| r.seeded).count(), 1);
        assert!(reports.iter().all(|r| r.schema_version == 1));

        let conn = Connection::open(&path).unwrap();
        assert_eq!(fetch_all_products(&conn).unwrap().len(), 20);
    }
}

//! Runtime configuration
//!
//! Resolved from environment variables, falling back to `products.db` in
//! the working directory.

use std::path::{Path, PathBuf};

use crate::db::connection::DEFAULT_POOL_SIZE;

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "products.db";

/// Overrides the database file location
pub const DATABASE_PATH_ENV: &str = "PRODUCTS_DATABASE_PATH";

/// Overrides the connection pool size
pub const POOL_SIZE_ENV: &str = "PRODUCTS_POOL_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub pool_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(DATABASE_PATH_ENV).ok(),
            std::env::var(POOL_SIZE_ENV).ok(),
        )
    }

    fn from_vars(database_path: Option<String>, pool_size: Option<String>) -> Self {
        let defaults = Self::default();

        let database_path = database_path
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        // Unparseable or zero sizes fall back to the default
        let pool_size = pool_size
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.pool_size);

        Self {
            database_path,
            pool_size,
        }
    }

    /// Create the directory holding the database file, if it has one
    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        match self.database_path.parent() {
            Some(parent) if parent != Path::new("") => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(None, None);
        assert_eq!(config.database_path, PathBuf::from("products.db"));
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(Some("/tmp/shop/catalog.db".into()), Some("4".into()));
        assert_eq!(config.database_path, PathBuf::from("/tmp/shop/catalog.db"));
        assert_eq!(config.pool_size, 4);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_vars(Some("  ".into()), Some("zero".into()));
        assert_eq!(config, Config::default());

        let config = Config::from_vars(None, Some("0".into()));
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_ensure_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: dir.path().join("nested").join("products.db"),
            ..Config::default()
        };

        config.ensure_data_dir().unwrap();
        assert!(dir.path().join("nested").is_dir());

        // Bare file name has no directory to create
        Config::default().ensure_data_dir().unwrap();
    }
}

//! Product store
//!
//! CRUD facade over the products table. The store owns a connection pool;
//! every operation checks out one connection for one statement.
//!
//! Every mutation returns a `StoreResult`. Storage failures are also
//! written to the log before being handed back to the caller.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, error};

use crate::config::{Config, DEFAULT_DATABASE_PATH};
use crate::db::{BootstrapReport, Database, DbError};
use crate::models::{fetch_all_products, validate_qty, Product, ProductData, ValidationError};

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Log a failed mutation and convert it for the caller
fn log_failure(action: &'static str, err: DbError) -> StoreError {
    error!(error = %err, "Error {}", action);
    StoreError::Db(err)
}

#[derive(Clone)]
pub struct ProductStore {
    database: Database,
}

impl ProductStore {
    /// Wrap an existing pool. No bootstrap is run.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Open the database at `path` and bring it up to date (schema + seed)
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let store = Self::new(Database::new(path)?);
        store.bootstrap()?;
        Ok(store)
    }

    /// Open `products.db` in the working directory
    pub fn open_default() -> StoreResult<Self> {
        Self::open(DEFAULT_DATABASE_PATH)
    }

    /// Open the database described by `config`
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        let store = Self::new(Database::with_pool_size(
            &config.database_path,
            config.pool_size,
        )?);
        store.bootstrap()?;
        Ok(store)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Run migrations and seed a newly created schema
    pub fn bootstrap(&self) -> StoreResult<BootstrapReport> {
        Ok(self.database.bootstrap()?)
    }

    /// All products, sorted ascending by id
    pub fn list_products(&self) -> StoreResult<Vec<Product>> {
        let mut products = self.database.with_conn(fetch_all_products)?;
        products.sort_by_key(|p| p.id);
        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Insert a product and return it with its assigned id
    pub fn add_product(&self, product: &ProductData) -> StoreResult<Product> {
        product.validate()?;
        self.database
            .with_conn(|conn| Product::create(conn, product))
            .map_err(|e| log_failure("adding product", e))
    }

    pub fn get_product(&self, id: i64) -> StoreResult<Option<Product>> {
        Ok(self.database.with_conn(|conn| Product::get_by_id(conn, id))?)
    }

    /// Set the quantity of a product.
    ///
    /// A negative quantity is rejected before the database is touched.
    /// Returns Ok(false) when no product has this id.
    pub fn update_qty(&self, id: i64, qty: i64) -> StoreResult<bool> {
        validate_qty(qty)?;
        self.database
            .with_conn(|conn| Product::update_qty(conn, id, qty))
            .map_err(|e| log_failure("updating quantity", e))
    }

    /// Returns Ok(false) when no product has this id
    pub fn delete_product(&self, id: i64) -> StoreResult<bool> {
        self.database
            .with_conn(|conn| Product::delete(conn, id))
            .map_err(|e| log_failure("deleting product", e))
    }

    /// Replace all four mutable fields of a product.
    /// Returns Ok(false) when no product has this id.
    pub fn update_product(&self, id: i64, product: &ProductData) -> StoreResult<bool> {
        product.validate()?;
        self.database
            .with_conn(|conn| Product::update(conn, id, product))
            .map_err(|e| log_failure("updating product", e))
    }

    pub fn count_products(&self) -> StoreResult<i64> {
        Ok(self.database.with_conn(Product::count)?)
    }
}

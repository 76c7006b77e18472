//! Product model
//!
//! Represents a sellable item in the catalog.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::db::{DbError, DbResult};

/// Rejected product input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Quantity cannot be negative (got {0})")]
    NegativeQuantity(i64),
}

/// Check the non-negative quantity rule
pub fn validate_qty(qty: i64) -> Result<(), ValidationError> {
    if qty < 0 {
        return Err(ValidationError::NegativeQuantity(qty));
    }
    Ok(())
}

/// A product stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub qty: i64,
}

/// Data for creating or fully replacing a product.
///
/// All four fields are written on replace; there is no partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    pub description: String,
    pub cost: f64,
    #[serde(default)]
    pub qty: i64,
}

impl ProductData {
    pub fn new(name: impl Into<String>, description: impl Into<String>, cost: f64, qty: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            cost,
            qty,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_qty(self.qty)
    }
}

impl Product {
    /// Create a Product from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            cost: row.get("cost")?,
            qty: row.get::<_, Option<i64>>("qty")?.unwrap_or(0),
        })
    }

    /// Insert a new product; the id is assigned by SQLite
    pub fn create(conn: &Connection, data: &ProductData) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO products (name, description, cost, qty) VALUES (?1, ?2, ?3, ?4)",
            params![data.name, data.description, data.cost, data.qty],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, name = %data.name, "Inserted product");

        Self::get_by_id(conn, id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a product by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM products WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace every mutable field of a product.
    /// Returns Ok(false) if no product has this id.
    pub fn update(conn: &Connection, id: i64, data: &ProductData) -> DbResult<bool> {
        let rows = conn.execute(
            "UPDATE products SET name = ?1, description = ?2, cost = ?3, qty = ?4 WHERE id = ?5",
            params![data.name, data.description, data.cost, data.qty, id],
        )?;
        debug!(id, rows, "Updated product");
        Ok(rows > 0)
    }

    /// Set only the quantity column.
    /// Returns Ok(false) if no product has this id.
    pub fn update_qty(conn: &Connection, id: i64, qty: i64) -> DbResult<bool> {
        let rows = conn.execute(
            "UPDATE products SET qty = ?1 WHERE id = ?2",
            params![qty, id],
        )?;
        debug!(id, qty, rows, "Updated product quantity");
        Ok(rows > 0)
    }

    /// Delete a product.
    /// Returns Ok(true) if deleted, Ok(false) if not found
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM products WHERE id = ?1", [id])?;
        debug!(id, rows, "Deleted product");
        Ok(rows > 0)
    }

    /// Count all products
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Fetch every product row in storage order (no ORDER BY)
pub fn fetch_all_products(conn: &Connection) -> DbResult<Vec<Product>> {
    let mut stmt = conn.prepare("SELECT * FROM products")?;

    let products = stmt
        .query_map([], Product::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(products)
}

//! Seed catalog
//!
//! The fixed set of products written into a newly created database.

use rusqlite::{params, Connection};
use tracing::info;

use super::connection::DbResult;

/// (name, description, cost, qty)
pub const SEED_PRODUCTS: [(&str, &str, f64, i64); 20] = [
    ("Backpack", "A durable and stylish backpack for daily use.", 800.0, 10),
    ("Wireless Mouse", "A sleek and ergonomic wireless mouse with a long battery life.", 800.0, 20),
    ("Bluetooth Speaker", "A portable Bluetooth speaker with high-quality sound and deep bass.", 3000.0, 30),
    ("Laptop Stand", "An adjustable laptop stand for better posture and cooling.", 250.0, 15),
    ("Notebook", "A premium notebook with thick, high-quality paper.", 50.0, 50),
    ("Smartphone Case", "A durable and stylish case for protecting your smartphone.", 150.0, 25),
    ("Power Bank", "A high-capacity power bank with fast charging support.", 900.0, 20),
    ("Headphones", "Over-ear headphones with noise cancellation and deep bass.", 5000.0, 10),
    ("Gaming Keyboard", "A mechanical gaming keyboard with RGB lighting.", 3000.0, 10),
    ("USB-C Hub", "A multi-port USB-C hub for all your connectivity needs.", 400.0, 25),
    ("Fitness Tracker", "A sleek fitness tracker with heart rate monitoring.", 1000.0, 20),
    ("Travel Mug", "An insulated travel mug that keeps your drinks hot or cold.", 500.0, 30),
    ("Desk Organizer", "A compact desk organizer for keeping your workspace tidy.", 1200.0, 40),
    ("External Hard Drive", "A portable external hard drive with 1TB of storage.", 800.0, 15),
    ("Wireless Charger", "A fast wireless charger compatible with most devices.", 2500.0, 30),
    ("Digital Camera", "A compact digital camera with 4K video recording.", 20000.0, 5),
    ("Electric Kettle", "A fast-boiling electric kettle with auto shut-off.", 3000.0, 20),
    ("Smart Watch", "A stylish smartwatch with fitness and notification features.", 12000.0, 10),
    ("LED Desk Lamp", "A modern LED desk lamp with adjustable brightness.", 2000.0, 35),
    ("Portable Projector", "A mini portable projector with HD resolution.", 15000.0, 8),
];

/// Insert the seed catalog in order. Returns the number of rows written.
pub fn seed_products(conn: &Connection) -> DbResult<usize> {
    let mut stmt = conn.prepare(
        "INSERT INTO products (name, description, cost, qty) VALUES (?1, ?2, ?3, ?4)",
    )?;

    for (name, description, cost, qty) in SEED_PRODUCTS {
        stmt.execute(params![name, description, cost, qty])?;
    }

    info!(count = SEED_PRODUCTS.len(), "Seeded product catalog");
    Ok(SEED_PRODUCTS.len())
}

/// Insert the seed catalog only if the products table has no rows
pub fn seed_if_empty(conn: &Connection) -> DbResult<bool> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(false);
    }

    seed_products(conn)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    #[test]
    fn test_seed_catalog_shape() {
        assert_eq!(SEED_PRODUCTS.len(), 20);
        assert_eq!(SEED_PRODUCTS[0].0, "Backpack");
        assert_eq!(SEED_PRODUCTS[19].0, "Portable Projector");
        assert!(SEED_PRODUCTS.iter().all(|(_, _, cost, qty)| *cost > 0.0 && *qty >= 0));
    }

    #[test]
    fn test_seed_assigns_sequential_ids() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(seed_products(&conn).unwrap(), 20);

        let (min, max): (i64, i64) = conn
            .query_row("SELECT MIN(id), MAX(id) FROM products", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!((min, max), (1, 20));
    }

    #[test]
    fn test_seed_if_empty_skips_populated_table() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert!(seed_if_empty(&conn).unwrap());
        assert!(!seed_if_empty(&conn).unwrap());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 20);
    }
}

//! Data models
//!
//! Rust structs representing database entities.

mod product;

pub use product::{fetch_all_products, validate_qty, Product, ProductData, ValidationError};

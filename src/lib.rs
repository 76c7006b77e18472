//! Product Store Library
//!
//! SQLite-backed product catalog with CRUD operations.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod store;
pub mod tools;

pub use config::Config;
pub use models::{Product, ProductData};
pub use store::{ProductStore, StoreError, StoreResult};

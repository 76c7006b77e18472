//! Product Store Tools module
//!
//! MCP tool implementations for the product catalog.

pub mod products;
pub mod status;

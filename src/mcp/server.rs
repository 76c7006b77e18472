//! Product Store MCP Server Implementation
//!
//! Exposes the product store operations as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::ProductData;
use crate::store::{ProductStore, StoreError};
use crate::tools::products;
use crate::tools::status::StatusTracker;

/// Product Store MCP Service
#[derive(Clone)]
pub struct ProductService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    store: ProductStore,
    tool_router: ToolRouter<ProductService>,
}

impl ProductService {
    pub fn new(database_path: PathBuf, store: ProductStore) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            store,
            tool_router: Self::tool_router(),
        }
    }
}

/// Validation failures are the caller's fault; everything else is ours
fn to_mcp_error(err: StoreError) -> McpError {
    if err.is_validation() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProductParams {
    /// Product ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddProductParams {
    pub name: String,
    pub description: String,
    /// Unit price
    pub cost: f64,
    /// Units in stock (defaults to 0, must not be negative)
    #[serde(default)]
    pub qty: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProductParams {
    /// Product ID
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Unit price
    pub cost: f64,
    /// Units in stock (must not be negative)
    pub qty: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProductQtyParams {
    /// Product ID
    pub id: i64,
    /// New quantity (must not be negative)
    pub qty: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteProductParams {
    /// Product ID
    pub id: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl ProductService {
    #[tool(description = "Get the current status of the Product Store service including build info, database status, and process information")]
    async fn store_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.store);
        json_result(&status)
    }

    #[tool(description = "List every product in the catalog, ordered by id")]
    fn list_products(&self) -> Result<CallToolResult, McpError> {
        let result = products::list_products(&self.store).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Get a single product by id")]
    fn get_product(&self, Parameters(p): Parameters<GetProductParams>) -> Result<CallToolResult, McpError> {
        let result = products::get_product(&self.store, p.id).map_err(to_mcp_error)?;
        match result {
            Some(product) => json_result(&product),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "Product not found", "id": {}}}"#,
                p.id
            ))])),
        }
    }

    #[tool(description = "Add a new product. The id is assigned automatically; qty defaults to 0.")]
    fn add_product(&self, Parameters(p): Parameters<AddProductParams>) -> Result<CallToolResult, McpError> {
        let data = ProductData::new(p.name, p.description, p.cost, p.qty);
        let result = products::add_product(&self.store, data).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Replace a product's name, description, cost and qty. All four fields are required.")]
    fn update_product(&self, Parameters(p): Parameters<UpdateProductParams>) -> Result<CallToolResult, McpError> {
        let data = ProductData::new(p.name, p.description, p.cost, p.qty);
        let result = products::update_product(&self.store, p.id, data).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Set the stock quantity of a product. Negative quantities are rejected.")]
    fn update_product_qty(&self, Parameters(p): Parameters<UpdateProductQtyParams>) -> Result<CallToolResult, McpError> {
        let result = products::update_product_qty(&self.store, p.id, p.qty).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Delete a product by id. Deleting a missing product is a no-op.")]
    fn delete_product(&self, Parameters(p): Parameters<DeleteProductParams>) -> Result<CallToolResult, McpError> {
        let result = products::delete_product(&self.store, p.id).map_err(to_mcp_error)?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for ProductService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "product-store".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Product Store".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Product Store - product catalog backed by SQLite. \
                 Products: list_products, get_product, add_product, update_product (all fields), \
                 update_product_qty (quantity only), delete_product. \
                 Quantities can never be negative. \
                 Use store_status for build and database information."
                    .into(),
            ),
        }
    }
}

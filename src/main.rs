//! Product Store
//!
//! An MCP server exposing the product catalog over stdio.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use product_store::build_info;
use product_store::mcp::ProductService;
use product_store::{Config, ProductStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so stdout stays reserved for MCP traffic
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("product_store=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Database path: {}", config.database_path.display());
    config.ensure_data_dir()?;

    // Migrate and seed before serving any request
    let store = ProductStore::from_config(&config)?;
    let version = store
        .database()
        .with_conn(|conn| product_store::db::migrations::get_schema_version(conn))?;
    eprintln!("Database schema version: {}", version);

    let service = ProductService::new(config.database_path.clone(), store);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}

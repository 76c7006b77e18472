//! Utility to create, migrate and seed the product database, then print the catalog

use tracing_subscriber::EnvFilter;

use product_store::config::DATABASE_PATH_ENV;
use product_store::db::migrations::get_schema_version;
use product_store::{Config, ProductStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("product_store=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    println!("Database path: {}", config.database_path.display());

    // Both paths bootstrap the schema and seed a new database
    let store = if std::env::var_os(DATABASE_PATH_ENV).is_some() {
        config.ensure_data_dir()?;
        ProductStore::from_config(&config)?
    } else {
        ProductStore::open_default()?
    };

    let version = store.database().with_conn(get_schema_version)?;
    println!("Schema version: {}", version);

    let products = store.list_products()?;
    println!("{} product(s):", products.len());
    for product in &products {
        println!(
            "  {:>4}  {:<24} {:>10.2}  qty {:>4}",
            product.id, product.name, product.cost, product.qty
        );
    }

    Ok(())
}

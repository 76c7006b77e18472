//! Product MCP Tools
//!
//! Tools for managing products in the catalog.

use serde::Serialize;

use crate::models::{Product, ProductData};
use crate::store::{ProductStore, StoreResult};

/// Response for list_products
#[derive(Debug, Serialize)]
pub struct ListProductsResponse {
    pub products: Vec<Product>,
    pub total: usize,
}

/// Response for add_product
#[derive(Debug, Serialize)]
pub struct AddProductResponse {
    pub success: bool,
    pub product: Product,
}

/// Response for update_product and update_product_qty
#[derive(Debug, Serialize)]
pub struct UpdateProductResponse {
    pub success: bool,
    pub id: i64,
    /// False when no product had this id; nothing was changed
    pub found: bool,
    pub product: Option<Product>,
}

/// Response for delete_product
#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub success: bool,
    pub deleted_id: i64,
    pub found: bool,
}

/// List every product, ordered by id
pub fn list_products(store: &ProductStore) -> StoreResult<ListProductsResponse> {
    let products = store.list_products()?;
    let total = products.len();
    Ok(ListProductsResponse { products, total })
}

pub fn get_product(store: &ProductStore, id: i64) -> StoreResult<Option<Product>> {
    store.get_product(id)
}

pub fn add_product(store: &ProductStore, data: ProductData) -> StoreResult<AddProductResponse> {
    let product = store.add_product(&data)?;
    Ok(AddProductResponse {
        success: true,
        product,
    })
}

/// Replace all fields of a product
pub fn update_product(
    store: &ProductStore,
    id: i64,
    data: ProductData,
) -> StoreResult<UpdateProductResponse> {
    let found = store.update_product(id, &data)?;
    updated_response(store, id, found)
}

/// Set only the quantity of a product
pub fn update_product_qty(
    store: &ProductStore,
    id: i64,
    qty: i64,
) -> StoreResult<UpdateProductResponse> {
    let found = store.update_qty(id, qty)?;
    updated_response(store, id, found)
}

fn updated_response(store: &ProductStore, id: i64, found: bool) -> StoreResult<UpdateProductResponse> {
    let product = if found { store.get_product(id)? } else { None };
    Ok(UpdateProductResponse {
        success: true,
        id,
        found,
        product,
    })
}

pub fn delete_product(store: &ProductStore, id: i64) -> StoreResult<DeleteProductResponse> {
    let found = store.delete_product(id)?;
    Ok(DeleteProductResponse {
        success: true,
        deleted_id: id,
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store() -> (ProductStore, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProductStore::open(dir.path().join("products.db")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_list_products_response() {
        let (store, _dir) = open_store();

        let response = list_products(&store).unwrap();
        assert_eq!(response.total, 20);
        assert_eq!(response.products[0].name, "Backpack");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total"], 20);
        assert_eq!(json["products"][0]["id"], 1);
        assert_eq!(json["products"][0]["qty"], 10);
    }

    #[test]
    fn test_update_missing_product_reports_not_found() {
        let (store, _dir) = open_store();

        let response = update_product_qty(&store, 404, 2).unwrap();
        assert!(response.success);
        assert!(!response.found);
        assert!(response.product.is_none());
    }

    #[test]
    fn test_update_returns_new_state() {
        let (store, _dir) = open_store();

        let response = update_product_qty(&store, 4, 1).unwrap();
        assert!(response.found);
        assert_eq!(response.product.unwrap().qty, 1);

        let data = ProductData::new("Notebook A5", "A smaller notebook.", 40.0, 60);
        let response = update_product(&store, 5, data).unwrap();
        assert_eq!(response.product.unwrap().name, "Notebook A5");
    }

    #[test]
    fn test_add_then_delete() {
        let (store, _dir) = open_store();

        let added = add_product(&store, ProductData::new("Pen", "A pen.", 5.0, 0)).unwrap();
        assert_eq!(added.product.id, 21);

        let deleted = delete_product(&store, 21).unwrap();
        assert!(deleted.found);
        assert!(get_product(&store, 21).unwrap().is_none());

        let again = delete_product(&store, 21).unwrap();
        assert!(again.success);
        assert!(!again.found);
    }
}

//! Product endpoints, including the archived-products listing.

use serde::Serialize;
use stockdeck_core::product::Product;
use stockdeck_core::types::DbId;

use crate::api::ApiClient;
use crate::error::ApiResult;

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub description: String,
    pub inventory_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_stock_level: Option<i64>,
}

/// Payload for updating a product; unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_stock_level: Option<i64>,
}

impl ApiClient {
    /// `GET /api/products/all`
    pub async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.get_json("products/all").await
    }

    /// `GET /api/products/archived`
    pub async fn list_archived_products(&self) -> ApiResult<Vec<Product>> {
        self.get_json("products/archived").await
    }

    /// `GET /api/products/{id}`
    pub async fn get_product(&self, id: DbId) -> ApiResult<Product> {
        self.get_json(&format!("products/{id}")).await
    }

    /// `POST /api/products`
    pub async fn create_product(&self, input: &NewProduct) -> ApiResult<Product> {
        self.post_json("products", input).await
    }

    /// `PUT /api/products/{id}`
    pub async fn update_product(&self, id: DbId, input: &UpdateProduct) -> ApiResult<Product> {
        self.put_json(&format!("products/{id}"), input).await
    }

    /// `DELETE /api/products/{id}`
    pub async fn delete_product(&self, id: DbId) -> ApiResult<()> {
        self.delete(&format!("products/{id}")).await
    }

    /// `POST /api/products/{id}/archive`
    pub async fn archive_product(&self, id: DbId) -> ApiResult<Product> {
        self.post_action(&format!("products/{id}/archive")).await
    }

    /// `POST /api/products/{id}/unarchive`
    pub async fn unarchive_product(&self, id: DbId) -> ApiResult<Product> {
        self.post_action(&format!("products/{id}/unarchive")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_serializes_camel_case() {
        let input = NewProduct {
            name: "Widget".to_string(),
            price: 9.99,
            quantity: 50,
            description: "A widget".to_string(),
            inventory_id: 3,
            minimum_stock_level: Some(5),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["inventoryId"], 3);
        assert_eq!(json["minimumStockLevel"], 5);
    }

    #[test]
    fn update_product_omits_unset_fields() {
        let update = UpdateProduct {
            quantity: Some(10),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"quantity": 10}));
    }
}

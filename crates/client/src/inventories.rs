//! Inventory endpoints.

use serde::Serialize;
use stockdeck_core::inventory::{Inventory, InventoryType};
use stockdeck_core::types::DbId;

use crate::api::ApiClient;
use crate::error::ApiResult;

/// Payload for creating an inventory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventory {
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub inventory_type: InventoryType,
    pub capacity: i64,
}

/// Payload for updating an inventory. Fields left `None` are omitted
/// from the request so the backend keeps their current values.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub inventory_type: Option<InventoryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
}

impl ApiClient {
    /// `GET /api/inventories/all`
    pub async fn list_inventories(&self) -> ApiResult<Vec<Inventory>> {
        self.get_json("inventories/all").await
    }

    /// `GET /api/inventories/{id}`
    pub async fn get_inventory(&self, id: DbId) -> ApiResult<Inventory> {
        self.get_json(&format!("inventories/{id}")).await
    }

    /// `POST /api/inventories`
    pub async fn create_inventory(&self, input: &NewInventory) -> ApiResult<Inventory> {
        self.post_json("inventories", input).await
    }

    /// `PUT /api/inventories/{id}`
    pub async fn update_inventory(
        &self,
        id: DbId,
        input: &UpdateInventory,
    ) -> ApiResult<Inventory> {
        self.put_json(&format!("inventories/{id}"), input).await
    }

    /// `DELETE /api/inventories/{id}`
    pub async fn delete_inventory(&self, id: DbId) -> ApiResult<()> {
        self.delete(&format!("inventories/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_payload_omits_unset_fields() {
        let update = UpdateInventory {
            capacity: Some(500),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"capacity": 500}));
    }

    #[test]
    fn new_inventory_serializes_wire_shape() {
        let input = NewInventory {
            name: "Main".to_string(),
            location: "Berlin".to_string(),
            inventory_type: InventoryType::Warehouse,
            capacity: 1000,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["type"], "WAREHOUSE");
        assert_eq!(json["capacity"], 1000);
    }
}

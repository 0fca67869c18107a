//! Inventory entity and client-side capacity validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::product::Product;
use crate::types::{DbId, Timestamp};

/// Kind of physical location an inventory represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryType {
    Warehouse,
    Store,
    DistributionCenter,
}

/// An inventory as served by the backend. The client never owns this
/// data -- it exists locally only as the result of the most recent
/// successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: DbId,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub inventory_type: InventoryType,
    /// Maximum total product quantity this inventory can hold.
    pub capacity: i64,
    /// Server-derived utilisation percentage; not client-authoritative.
    #[serde(default)]
    pub capacity_used_percent: Option<f64>,
    /// Contained products. List endpoints may omit this.
    #[serde(default)]
    pub products: Vec<Product>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Inventory {
    /// Sum of the quantities of all products fetched with this inventory.
    pub fn total_quantity(&self) -> i64 {
        self.products.iter().map(|p| p.quantity).sum()
    }
}

/// Validate a capacity value before submitting an inventory mutation.
///
/// Runs client-side so the common rejection ("capacity below what the
/// inventory already holds") never needs a round-trip.
pub fn validate_capacity(capacity: i64, total_quantity: i64) -> Result<(), CoreError> {
    if capacity <= 0 {
        return Err(CoreError::Validation(
            "Capacity must be a positive number".to_string(),
        ));
    }
    if capacity < total_quantity {
        return Err(CoreError::Validation(format!(
            "Capacity ({capacity}) cannot be lower than the total quantity of products currently stored ({total_quantity})"
        )));
    }
    Ok(())
}

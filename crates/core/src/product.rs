//! Product entity and the low-stock predicate.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Fallback low-stock threshold for products without a per-product
/// `minimum_stock_level`. This is the single configuration point for the
/// global default; per-product values override it.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// A product as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    /// Unit price; non-negative.
    pub price: f64,
    /// Units currently in stock; non-negative.
    pub quantity: i64,
    #[serde(default)]
    pub description: String,
    pub inventory_id: DbId,
    /// Per-product low-stock threshold, when configured.
    #[serde(default)]
    pub minimum_stock_level: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Threshold below which this product counts as low stock: the
    /// per-product minimum when set, else [`DEFAULT_LOW_STOCK_THRESHOLD`].
    pub fn low_stock_threshold(&self) -> i64 {
        self.minimum_stock_level
            .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    /// True when `quantity` has fallen below the low-stock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.low_stock_threshold()
    }
}

/// Validate product fields before submitting a create/update mutation.
pub fn validate_product_input(name: &str, price: f64, quantity: i64) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Product name must not be empty".to_string(),
        ));
    }
    if price < 0.0 {
        return Err(CoreError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    if quantity < 0 {
        return Err(CoreError::Validation(
            "Quantity must not be negative".to_string(),
        ));
    }
    Ok(())
}

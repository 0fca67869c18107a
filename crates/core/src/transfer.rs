//! Transfer entity: a move of product quantity between two inventories.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::product::Product;
use crate::types::{DbId, Timestamp};

/// Lifecycle state of a transfer. Completing or cancelling is only
/// valid from `Pending`; the backend enforces this, the client surfaces
/// it via [`Transfer::can_resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Pending,
    Completed,
    Cancelled,
}

/// A transfer as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: DbId,
    pub product_id: DbId,
    pub source_inventory_id: DbId,
    pub destination_inventory_id: DbId,
    pub quantity: i64,
    pub status: TransferStatus,
    #[serde(default)]
    pub archived: bool,
    pub created_at: Timestamp,
}

impl Transfer {
    /// True when the transfer can still be completed or cancelled.
    pub fn can_resolve(&self) -> bool {
        self.status == TransferStatus::Pending
    }
}

/// Validate a new transfer before any network call.
///
/// `source_product` is the product as currently stocked in the source
/// inventory; its `quantity` is the available amount at submit time.
pub fn validate_new_transfer(
    source_product: &Product,
    source_inventory_id: DbId,
    destination_inventory_id: DbId,
    quantity: i64,
) -> Result<(), CoreError> {
    if source_inventory_id == destination_inventory_id {
        return Err(CoreError::Validation(
            "Source and destination inventories must differ".to_string(),
        ));
    }
    if quantity <= 0 {
        return Err(CoreError::Validation(
            "Transfer quantity must be a positive number".to_string(),
        ));
    }
    if quantity > source_product.quantity {
        return Err(CoreError::Validation(format!(
            "Transfer quantity cannot exceed available quantity ({} in stock)",
            source_product.quantity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn stocked_product(quantity: i64) -> Product {
        Product {
            id: 7,
            name: "Widget".to_string(),
            price: 2.5,
            quantity,
            description: String::new(),
            inventory_id: 1,
            minimum_stock_level: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn same_source_and_destination_is_rejected() {
        let err = validate_new_transfer(&stocked_product(10), 1, 1, 5).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) => {
            assert!(msg.contains("must differ"));
        });
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        assert_matches!(
            validate_new_transfer(&stocked_product(10), 1, 2, 0),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_new_transfer(&stocked_product(10), 1, 2, -3),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn quantity_above_available_is_rejected_before_any_network_call() {
        let err = validate_new_transfer(&stocked_product(4), 1, 2, 5).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) => {
            assert!(msg.contains("cannot exceed available quantity"));
        });
    }

    #[test]
    fn full_available_quantity_is_transferable() {
        assert!(validate_new_transfer(&stocked_product(5), 1, 2, 5).is_ok());
    }

    #[test]
    fn only_pending_transfers_can_resolve() {
        let mut t = Transfer {
            id: 1,
            product_id: 7,
            source_inventory_id: 1,
            destination_inventory_id: 2,
            quantity: 3,
            status: TransferStatus::Pending,
            archived: false,
            created_at: Utc::now(),
        };
        assert!(t.can_resolve());
        t.status = TransferStatus::Completed;
        assert!(!t.can_resolve());
        t.status = TransferStatus::Cancelled;
        assert!(!t.can_resolve());
    }
}

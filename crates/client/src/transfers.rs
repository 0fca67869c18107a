//! Transfer endpoints: creation plus the status and archive sub-actions.

use serde::Serialize;
use stockdeck_core::transfer::Transfer;
use stockdeck_core::types::DbId;

use crate::api::ApiClient;
use crate::error::ApiResult;

/// Payload for creating a transfer.
///
/// Callers are expected to have run
/// [`validate_new_transfer`](stockdeck_core::transfer::validate_new_transfer)
/// first; the backend re-checks and rejects invalid moves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    pub product_id: DbId,
    pub source_inventory_id: DbId,
    pub destination_inventory_id: DbId,
    pub quantity: i64,
}

impl ApiClient {
    /// `GET /api/transfers`
    pub async fn list_transfers(&self) -> ApiResult<Vec<Transfer>> {
        self.get_json("transfers").await
    }

    /// `POST /api/transfers`
    pub async fn create_transfer(&self, input: &NewTransfer) -> ApiResult<Transfer> {
        self.post_json("transfers", input).await
    }

    /// `POST /api/transfers/{id}/complete` -- only valid from PENDING.
    pub async fn complete_transfer(&self, id: DbId) -> ApiResult<Transfer> {
        self.post_action(&format!("transfers/{id}/complete")).await
    }

    /// `POST /api/transfers/{id}/cancel` -- only valid from PENDING.
    pub async fn cancel_transfer(&self, id: DbId) -> ApiResult<Transfer> {
        self.post_action(&format!("transfers/{id}/cancel")).await
    }

    /// `POST /api/transfers/{id}/archive`
    pub async fn archive_transfer(&self, id: DbId) -> ApiResult<Transfer> {
        self.post_action(&format!("transfers/{id}/archive")).await
    }

    /// `POST /api/transfers/{id}/unarchive`
    pub async fn unarchive_transfer(&self, id: DbId) -> ApiResult<Transfer> {
        self.post_action(&format!("transfers/{id}/unarchive")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transfer_serializes_camel_case() {
        let input = NewTransfer {
            product_id: 7,
            source_inventory_id: 1,
            destination_inventory_id: 2,
            quantity: 5,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["productId"], 7);
        assert_eq!(json["sourceInventoryId"], 1);
        assert_eq!(json["destinationInventoryId"], 2);
        assert_eq!(json["quantity"], 5);
    }
}

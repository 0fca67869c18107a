//! Mutation orchestration.
//!
//! Every successful mutation does the same three things: append a
//! recent-activity entry, trigger a refresh on the resource's
//! synchronizer, and publish a success notification. Every failed
//! mutation becomes an error notification with the translated backend
//! message. Nothing propagates past this module.
//!
//! Client-side validation runs before any network call; a validation
//! failure costs no round-trip.

use std::sync::Arc;

use stockdeck_client::inventories::{NewInventory, UpdateInventory};
use stockdeck_client::products::{NewProduct, UpdateProduct};
use stockdeck_client::transfers::NewTransfer;
use stockdeck_client::{ApiClient, ApiError};
use stockdeck_core::activity::{ActivityKind, NewActivity};
use stockdeck_core::inventory::{validate_capacity, Inventory};
use stockdeck_core::product::{validate_product_input, Product};
use stockdeck_core::transfer::{validate_new_transfer, Transfer};
use stockdeck_core::types::DbId;
use stockdeck_notify::NotificationHub;
use stockdeck_store::ActivityLog;
use stockdeck_sync::{RefreshReason, SyncHandle};

/// Runs resource mutations and their follow-up effects.
pub struct ResourceMutator {
    client: ApiClient,
    activity: ActivityLog,
    hub: Arc<NotificationHub>,
}

impl ResourceMutator {
    pub fn new(client: ApiClient, activity: ActivityLog, hub: Arc<NotificationHub>) -> Self {
        Self {
            client,
            activity,
            hub,
        }
    }

    /// Follow-up for a committed mutation: journal, re-fetch, notify.
    fn committed<T: Clone>(
        &self,
        activity: Option<NewActivity>,
        sync: &SyncHandle<T>,
        message: impl Into<String>,
    ) {
        if let Some(activity) = activity {
            if let Err(e) = self.activity.append(activity) {
                // The mutation itself succeeded; a journal write failure
                // is diagnostic-only.
                tracing::warn!(error = %e, "Failed to record activity");
            }
        }
        sync.refresh(RefreshReason::Mutation);
        self.hub.success(message);
    }

    fn rejected(&self, error: &ApiError) {
        self.hub.error(error.user_message());
    }

    // -----------------------------------------------------------------
    // Inventories
    // -----------------------------------------------------------------

    pub async fn create_inventory(
        &self,
        input: NewInventory,
        sync: &SyncHandle<Inventory>,
    ) -> bool {
        if let Err(e) = validate_capacity(input.capacity, 0) {
            self.hub.error(e.to_string());
            return false;
        }

        match self.client.create_inventory(&input).await {
            Ok(inventory) => {
                self.committed(
                    Some(
                        NewActivity::new(
                            ActivityKind::InventoryCreated,
                            "Inventory created",
                            &inventory.name,
                        )
                        .with_display("warehouse", "green"),
                    ),
                    sync,
                    format!("Inventory \"{}\" created", inventory.name),
                );
                true
            }
            Err(e) => {
                self.rejected(&e);
                false
            }
        }
    }

    /// Update an inventory. `current_total_quantity` is the sum of
    /// product quantities the inventory holds right now, used to
    /// pre-validate a capacity change client-side.
    pub async fn update_inventory(
        &self,
        id: DbId,
        current_total_quantity: i64,
        input: UpdateInventory,
        sync: &SyncHandle<Inventory>,
    ) -> bool {
        if let Some(capacity) = input.capacity {
            if let Err(e) = validate_capacity(capacity, current_total_quantity) {
                self.hub.error(e.to_string());
                return false;
            }
        }

        match self.client.update_inventory(id, &input).await {
            Ok(inventory) => {
                self.committed(
                    Some(
                        NewActivity::new(
                            ActivityKind::InventoryUpdated,
                            "Inventory updated",
                            &inventory.name,
                        )
                        .with_display("warehouse", "blue"),
                    ),
                    sync,
                    format!("Inventory \"{}\" updated", inventory.name),
                );
                true
            }
            Err(e) => {
                self.rejected(&e);
                false
            }
        }
    }

    pub async fn delete_inventory(&self, id: DbId, sync: &SyncHandle<Inventory>) -> bool {
        match self.client.delete_inventory(id).await {
            Ok(()) => {
                // The journal has no inventory-deletion entry kind;
                // deletion still refreshes and notifies.
                self.committed(None, sync, "Inventory deleted");
                true
            }
            Err(e) => {
                self.rejected(&e);
                false
            }
        }
    }

    // -----------------------------------------------------------------
    // Products
    // -----------------------------------------------------------------

    pub async fn create_product(&self, input: NewProduct, sync: &SyncHandle<Product>) -> bool {
        if let Err(e) = validate_product_input(&input.name, input.price, input.quantity) {
            self.hub.error(e.to_string());
            return false;
        }

        match self.client.create_product(&input).await {
            Ok(product) => {
                self.committed(
                    Some(
                        NewActivity::new(
                            ActivityKind::ProductCreated,
                            "Product created",
                            &product.name,
                        )
                        .with_display("box", "green"),
                    ),
                    sync,
                    format!("Product \"{}\" created", product.name),
                );
                true
            }
            Err(e) => {
                self.rejected(&e);
                false
            }
        }
    }

    pub async fn update_product(
        &self,
        id: DbId,
        input: UpdateProduct,
        sync: &SyncHandle<Product>,
    ) -> bool {
        match self.client.update_product(id, &input).await {
            Ok(product) => {
                self.committed(
                    Some(
                        NewActivity::new(
                            ActivityKind::ProductUpdated,
                            "Product updated",
                            &product.name,
                        )
                        .with_display("box", "blue"),
                    ),
                    sync,
                    format!("Product \"{}\" updated", product.name),
                );
                true
            }
            Err(e) => {
                self.rejected(&e);
                false
            }
        }
    }

    pub async fn delete_product(
        &self,
        id: DbId,
        name: &str,
        sync: &SyncHandle<Product>,
    ) -> bool {
        match self.client.delete_product(id).await {
            Ok(()) => {
                self.committed(
                    Some(
                        NewActivity::new(ActivityKind::ProductDeleted, "Product deleted", name)
                            .with_display("box", "red"),
                    ),
                    sync,
                    format!("Product \"{name}\" deleted"),
                );
                true
            }
            Err(e) => {
                self.rejected(&e);
                false
            }
        }
    }

    pub async fn archive_product(&self, id: DbId, sync: &SyncHandle<Product>) -> bool {
        match self.client.archive_product(id).await {
            Ok(product) => {
                self.committed(
                    Some(
                        NewActivity::new(
                            ActivityKind::ProductUpdated,
                            "Product archived",
                            &product.name,
                        )
                        .with_display("archive", "gray"),
                    ),
                    sync,
                    format!("Product \"{}\" archived", product.name),
                );
                true
            }
            Err(e) => {
                self.rejected(&e);
                false
            }
        }
    }

    pub async fn unarchive_product(&self, id: DbId, sync: &SyncHandle<Product>) -> bool {
        match self.client.unarchive_product(id).await {
            Ok(product) => {
                self.committed(
                    Some(
                        NewActivity::new(
                            ActivityKind::ProductUpdated,
                            "Product restored",
                            &product.name,
                        )
                        .with_display("archive", "blue"),
                    ),
                    sync,
                    format!("Product \"{}\" restored", product.name),
                );
                true
            }
            Err(e) => {
                self.rejected(&e);
                false
            }
        }
    }

    // -----------------------------------------------------------------
    // Transfers
    // -----------------------------------------------------------------

    /// Create a transfer. `source_product` is the product as currently
    /// stocked in the source inventory; the availability check runs
    /// before any network call.
    pub async fn create_transfer(
        &self,
        source_product: &Product,
        input: NewTransfer,
        sync: &SyncHandle<Transfer>,
    ) -> bool {
        if let Err(e) = validate_new_transfer(
            source_product,
            input.source_inventory_id,
            input.destination_inventory_id,
            input.quantity,
        ) {
            self.hub.error(e.to_string());
            return false;
        }

        match self.client.create_transfer(&input).await {
            Ok(transfer) => {
                self.committed(
                    Some(
                        NewActivity::new(
                            ActivityKind::TransferCreated,
                            "Transfer created",
                            format!("{} x {}", transfer.quantity, source_product.name),
                        )
                        .with_display("arrows", "green"),
                    ),
                    sync,
                    "Transfer created",
                );
                true
            }
            Err(e) => {
                self.rejected(&e);
                false
            }
        }
    }

    pub async fn complete_transfer(&self, id: DbId, sync: &SyncHandle<Transfer>) -> bool {
        self.resolve_transfer(self.client.complete_transfer(id).await, "completed", sync)
    }

    pub async fn cancel_transfer(&self, id: DbId, sync: &SyncHandle<Transfer>) -> bool {
        self.resolve_transfer(self.client.cancel_transfer(id).await, "cancelled", sync)
    }

    pub async fn archive_transfer(&self, id: DbId, sync: &SyncHandle<Transfer>) -> bool {
        self.resolve_transfer(self.client.archive_transfer(id).await, "archived", sync)
    }

    pub async fn unarchive_transfer(&self, id: DbId, sync: &SyncHandle<Transfer>) -> bool {
        self.resolve_transfer(self.client.unarchive_transfer(id).await, "restored", sync)
    }

    /// Shared follow-up for the transfer sub-actions.
    fn resolve_transfer(
        &self,
        result: Result<Transfer, ApiError>,
        verb: &str,
        sync: &SyncHandle<Transfer>,
    ) -> bool {
        match result {
            Ok(transfer) => {
                self.committed(
                    Some(
                        NewActivity::new(
                            ActivityKind::TransferUpdated,
                            format!("Transfer {verb}"),
                            format!("Transfer #{}", transfer.id),
                        )
                        .with_display("arrows", "blue"),
                    ),
                    sync,
                    format!("Transfer {verb}"),
                );
                true
            }
            Err(e) => {
                self.rejected(&e);
                false
            }
        }
    }
}

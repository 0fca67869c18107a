//! `stockdeck` -- headless inventory dashboard client.
//!
//! Restores (or establishes) a session against the backend, runs the
//! layout guard for the landing subtree, then keeps the inventory,
//! product, and transfer lists synchronized, logging snapshot changes
//! and user notifications until interrupted.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default       | Description                         |
//! |------------------------|----------|---------------|-------------------------------------|
//! | `API_BASE_URL`         | yes      | --            | Backend base URL                    |
//! | `STATE_DIR`            | no       | `.stockdeck`  | Durable state directory             |
//! | `POLL_INTERVAL_SECS`   | no       | `10`          | Seconds between list re-fetches     |
//! | `HYDRATION_DELAY_MS`   | no       | `300`         | Delay before the first guard check  |
//! | `REQUEST_TIMEOUT_SECS` | no       | `30`          | Per-request HTTP timeout            |
//! | `STOCKDECK_EMAIL`      | no       | --            | Credentials used when no session    |
//! | `STOCKDECK_PASSWORD`   | no       | --            | is stored on disk                   |

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockdeck_app::{AppConfig, AuthFlow, GuardState, LayoutGuard};
use stockdeck_client::ApiClient;
use stockdeck_core::routes::GuardedSubtree;
use stockdeck_notify::NotificationHub;
use stockdeck_store::{ActivityLog, CookieJar, FileStore, SessionStore};
use stockdeck_sync::{spawn_list_sync, ListState, SyncConfig, SyncHandle};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockdeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let durable = Arc::new(FileStore::open(config.state_dir.join("state.json")));
    let cookies = CookieJar::new(Arc::new(FileStore::open(
        config.state_dir.join("cookies.json"),
    )));
    let session = Arc::new(SessionStore::new(durable.clone(), cookies));
    let activity = ActivityLog::new(durable);
    let hub = Arc::new(NotificationHub::default());

    let client = match ApiClient::with_timeout(
        config.api_base_url.clone(),
        session.clone(),
        config.request_timeout,
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        }
    };

    if !ensure_session(&client, &session, &hub).await {
        std::process::exit(1);
    }

    // Resolve the landing subtree the way a page load would.
    let guard = LayoutGuard::new(session.clone(), config.hydration_delay);
    let subtree = if session.is_admin() {
        GuardedSubtree::AdminOnly
    } else {
        GuardedSubtree::GeneralUser
    };
    match guard.check(subtree).await {
        GuardState::Authorized => {
            tracing::info!(admin = session.is_admin(), "Session authorized");
        }
        GuardState::Checking | GuardState::Denied { .. } => {
            tracing::error!("Stored session is no longer valid; sign in again");
            std::process::exit(1);
        }
    }

    let recent = activity.read_all();
    tracing::info!(entries = recent.len(), "Recent activity journal loaded");

    let sync_config = SyncConfig {
        poll_interval: config.poll_interval,
    };
    let cancel = CancellationToken::new();

    let inventories = {
        let client = client.clone();
        spawn_list_sync(
            "inventories",
            move || {
                let client = client.clone();
                async move { client.list_inventories().await.map_err(|e| e.user_message()) }
            },
            sync_config.clone(),
            hub.clone(),
            cancel.child_token(),
        )
    };

    let products = {
        let client = client.clone();
        spawn_list_sync(
            "products",
            move || {
                let client = client.clone();
                async move { client.list_products().await.map_err(|e| e.user_message()) }
            },
            sync_config.clone(),
            hub.clone(),
            cancel.child_token(),
        )
    };

    let transfers = {
        let client = client.clone();
        spawn_list_sync(
            "transfers",
            move || {
                let client = client.clone();
                async move { client.list_transfers().await.map_err(|e| e.user_message()) }
            },
            sync_config,
            hub.clone(),
            cancel.child_token(),
        )
    };

    tokio::spawn(print_notifications(hub.clone()));
    tokio::spawn(log_inventory_snapshots(inventories));
    tokio::spawn(log_product_snapshots(products));
    tokio::spawn(log_transfer_snapshots(transfers));

    tracing::info!(
        api = %config.api_base_url,
        interval_secs = config.poll_interval.as_secs(),
        "stockdeck running; press ctrl-c to stop",
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
    cancel.cancel();
}

/// Restore the stored session, or sign in with env credentials when
/// none exists. Returns false when no session could be established.
async fn ensure_session(
    client: &ApiClient,
    session: &Arc<SessionStore>,
    hub: &Arc<NotificationHub>,
) -> bool {
    if session.is_authenticated() {
        tracing::info!("Restored session from disk");
        return true;
    }

    let (email, password) = match (
        std::env::var("STOCKDECK_EMAIL"),
        std::env::var("STOCKDECK_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) => (email, password),
        _ => {
            tracing::error!(
                "No stored session and no STOCKDECK_EMAIL / STOCKDECK_PASSWORD credentials"
            );
            return false;
        }
    };

    let flow = AuthFlow::new(client.clone(), session.clone(), hub.clone());
    if !flow.login(&email, &password).await {
        tracing::error!("Sign-in failed");
        return false;
    }
    true
}

/// Surface notifications on the terminal.
async fn print_notifications(hub: Arc<NotificationHub>) {
    use tokio::sync::broadcast::error::RecvError;

    let mut rx = hub.subscribe();
    loop {
        match rx.recv().await {
            Ok(notification) => {
                tracing::info!(level = ?notification.level, "{}", notification.message);
            }
            // Dropped notifications are transient banners; skip ahead.
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
}

async fn log_inventory_snapshots(handle: SyncHandle<stockdeck_core::inventory::Inventory>) {
    let mut rx = handle.watch();
    while rx.changed().await.is_ok() {
        if let ListState::Ready { items, .. } = &*rx.borrow() {
            tracing::info!(count = items.len(), "Inventories");
        }
    }
}

async fn log_product_snapshots(handle: SyncHandle<stockdeck_core::product::Product>) {
    let mut rx = handle.watch();
    while rx.changed().await.is_ok() {
        if let ListState::Ready { items, .. } = &*rx.borrow() {
            let low_stock = items.iter().filter(|p| p.is_low_stock()).count();
            tracing::info!(count = items.len(), low_stock, "Products");
        }
    }
}

async fn log_transfer_snapshots(handle: SyncHandle<stockdeck_core::transfer::Transfer>) {
    let mut rx = handle.watch();
    while rx.changed().await.is_ok() {
        if let ListState::Ready { items, .. } = &*rx.borrow() {
            let pending = items.iter().filter(|t| t.can_resolve()).count();
            tracing::info!(count = items.len(), pending, "Transfers");
        }
    }
}

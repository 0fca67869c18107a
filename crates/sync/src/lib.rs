//! `stockdeck-sync` -- the resource list synchronizer.
//!
//! One polling loop per displayed resource list (inventories, products,
//! transfers), keeping a watch-channel snapshot reasonably fresh:
//! fetch on start, re-fetch on a fixed interval, and re-fetch on demand
//! (window focus, after a successful mutation).

pub mod synchronizer;

pub use synchronizer::{
    spawn_list_sync, ListState, RefreshReason, SyncConfig, SyncHandle, DEFAULT_POLL_INTERVAL,
};

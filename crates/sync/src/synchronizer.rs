//! Generic polling loop keeping one resource list fresh.
//!
//! All triggers converge on the same fetch: start-up, the interval
//! ticker, and on-demand refreshes. Overlapping triggers are allowed to
//! race -- in-flight fetches are never cancelled and responses apply in
//! arrival order, so the last response to land wins regardless of send
//! order. This is a documented property of the design, not an
//! oversight; the data is read-mostly and eventually consistent.
//!
//! A failed re-fetch never clears an already-populated snapshot: the
//! previous list stays rendered and an error notification is published.
//! Only a failure before the first success surfaces as
//! [`ListState::Failed`].
//!
//! On cancellation the ticker stops and the loop exits; fetches still
//! in flight run to completion but their results are discarded, so
//! nothing updates state after teardown.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use stockdeck_notify::NotificationHub;

/// Interval between background re-fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Why a fetch was triggered. Carried through to the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    /// Initial fetch when the synchronizer starts.
    Mount,
    /// The fixed polling interval elapsed.
    Interval,
    /// The window regained focus.
    Focus,
    /// A mutation on this resource type just succeeded.
    Mutation,
    /// An explicit user-driven refresh.
    Manual,
}

/// Snapshot of a synchronized list.
#[derive(Debug, Clone)]
pub enum ListState<T> {
    /// No fetch has completed yet.
    Loading,
    /// The most recent successful fetch.
    Ready {
        items: Vec<T>,
        fetched_at: DateTime<Utc>,
    },
    /// The first fetch failed and there is no prior data to show.
    Failed { message: String },
}

impl<T> ListState<T> {
    /// The items, when a successful fetch has landed.
    pub fn items(&self) -> Option<&[T]> {
        match self {
            ListState::Ready { items, .. } => Some(items),
            _ => None,
        }
    }
}

/// Tunables for one synchronizer instance.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub poll_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Handle to a running synchronizer: snapshot access, refresh triggers,
/// and shutdown.
pub struct SyncHandle<T> {
    snapshot: watch::Receiver<ListState<T>>,
    refresh_tx: mpsc::UnboundedSender<RefreshReason>,
    cancel: CancellationToken,
}

impl<T: Clone> SyncHandle<T> {
    /// A watch receiver for awaiting snapshot changes.
    pub fn watch(&self) -> watch::Receiver<ListState<T>> {
        self.snapshot.clone()
    }

    /// The current snapshot.
    pub fn current(&self) -> ListState<T> {
        self.snapshot.borrow().clone()
    }

    /// Request a re-fetch. A no-op after shutdown.
    pub fn refresh(&self, reason: RefreshReason) {
        let _ = self.refresh_tx.send(reason);
    }

    /// Stop the polling loop. In-flight fetch results are discarded.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// Spawn a synchronizer for one resource list.
///
/// `name` labels log lines; `fetcher` performs one fetch and returns
/// either the full list or a user-displayable error message.
pub fn spawn_list_sync<T, F, Fut>(
    name: &'static str,
    fetcher: F,
    config: SyncConfig,
    hub: Arc<NotificationHub>,
    cancel: CancellationToken,
) -> SyncHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, String>> + Send + 'static,
{
    let (state_tx, state_rx) = watch::channel(ListState::Loading);
    let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();

    let handle = SyncHandle {
        snapshot: state_rx,
        refresh_tx,
        cancel: cancel.clone(),
    };

    tokio::spawn(run_loop(
        name,
        Arc::new(fetcher),
        config,
        state_tx,
        refresh_rx,
        hub,
        cancel,
    ));

    handle
}

async fn run_loop<T, F, Fut>(
    name: &'static str,
    fetcher: Arc<F>,
    config: SyncConfig,
    state_tx: watch::Sender<ListState<T>>,
    mut refresh_rx: mpsc::UnboundedReceiver<RefreshReason>,
    hub: Arc<NotificationHub>,
    cancel: CancellationToken,
) where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, String>> + Send + 'static,
{
    // Results from racing fetch tasks, applied strictly in arrival order.
    let (result_tx, mut result_rx) =
        mpsc::unbounded_channel::<(RefreshReason, Result<Vec<T>, String>)>();

    let spawn_fetch = |reason: RefreshReason| {
        let fetcher = fetcher.clone();
        let result_tx = result_tx.clone();
        tokio::spawn(async move {
            let result = fetcher().await;
            // Send fails only after teardown; the late result is dropped.
            let _ = result_tx.send((reason, result));
        });
    };

    spawn_fetch(RefreshReason::Mount);

    // First interval tick fires one full period from now; the mount
    // fetch already covers "now".
    let mut ticker = tokio::time::interval_at(
        tokio::time::Instant::now() + config.poll_interval,
        config.poll_interval,
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(resource = name, "Synchronizer stopped");
                break;
            }
            _ = ticker.tick() => {
                spawn_fetch(RefreshReason::Interval);
            }
            Some(reason) = refresh_rx.recv() => {
                tracing::debug!(resource = name, ?reason, "Refresh requested");
                spawn_fetch(reason);
            }
            Some((reason, result)) = result_rx.recv() => {
                apply_result(name, reason, result, &state_tx, &hub);
            }
        }
    }
}

/// Fold one fetch outcome into the snapshot.
fn apply_result<T: Clone>(
    name: &'static str,
    reason: RefreshReason,
    result: Result<Vec<T>, String>,
    state_tx: &watch::Sender<ListState<T>>,
    hub: &NotificationHub,
) {
    match result {
        Ok(items) => {
            tracing::debug!(resource = name, ?reason, count = items.len(), "List refreshed");
            state_tx.send_replace(ListState::Ready {
                items,
                fetched_at: Utc::now(),
            });
        }
        Err(message) => {
            tracing::warn!(resource = name, ?reason, error = %message, "List fetch failed");
            hub.error(&message);
            let had_data = matches!(&*state_tx.borrow(), ListState::Ready { .. });
            if !had_data {
                // Never regress a populated snapshot to an error state.
                state_tx.send_replace(ListState::Failed { message });
            }
        }
    }
}

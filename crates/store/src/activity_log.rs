//! Bounded recent-activity journal.
//!
//! A most-recent-first list capped at [`MAX_ACTIVITY_ENTRIES`],
//! persisted on the durable store under one key. Eviction is FIFO by
//! insertion order, not by timestamp comparison, so entries with skewed
//! clocks still age out in append order. No de-duplication; concurrent
//! writers are last-write-wins on the shared key.

use std::sync::Arc;

use stockdeck_core::activity::{ActivityEntry, NewActivity};

use crate::kv::{KeyValueStore, StoreError};

/// Durable store key holding the JSON activity list.
pub const KEY_RECENT_ACTIVITIES: &str = "recentActivities";

/// Number of entries retained; the oldest is dropped first.
pub const MAX_ACTIVITY_ENTRIES: usize = 10;

/// The recent-activity journal. `append` and `read_all` are the whole
/// interface; the cap and ordering invariant live here and nowhere else.
#[derive(Clone)]
pub struct ActivityLog {
    store: Arc<dyn KeyValueStore>,
}

impl ActivityLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Record an activity: assigns a fresh id and timestamp, prepends,
    /// truncates to the cap, and persists. Returns the stored entry.
    pub fn append(&self, activity: NewActivity) -> Result<ActivityEntry, StoreError> {
        let entry = activity.into_entry();

        let mut entries = self.read_all();
        entries.insert(0, entry.clone());
        entries.truncate(MAX_ACTIVITY_ENTRIES);

        let json = serde_json::to_string(&entries)?;
        self.store.set(KEY_RECENT_ACTIVITIES, &json)?;

        tracing::debug!(kind = ?entry.kind, "Activity recorded");
        Ok(entry)
    }

    /// All retained entries, most recent first. A malformed stored list
    /// degrades to empty.
    pub fn read_all(&self) -> Vec<ActivityEntry> {
        let raw = match self.store.get(KEY_RECENT_ACTIVITIES) {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed activity list; treating as empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use stockdeck_core::activity::ActivityKind;

    fn log() -> ActivityLog {
        ActivityLog::new(Arc::new(MemoryStore::new()))
    }

    fn activity(n: usize) -> NewActivity {
        NewActivity::new(
            ActivityKind::ProductCreated,
            format!("Product created #{n}"),
            "test",
        )
    }

    #[test]
    fn append_prepends_most_recent_first() {
        let log = log();
        log.append(activity(1)).unwrap();
        log.append(activity(2)).unwrap();

        let entries = log.read_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Product created #2");
        assert_eq!(entries[1].title, "Product created #1");
    }

    #[test]
    fn eleventh_append_evicts_the_oldest() {
        let log = log();
        for n in 1..=11 {
            log.append(activity(n)).unwrap();
        }

        let entries = log.read_all();
        assert_eq!(entries.len(), MAX_ACTIVITY_ENTRIES);
        assert_eq!(entries[0].title, "Product created #11");
        assert_eq!(entries[9].title, "Product created #2");
        // #1 aged out.
        assert!(entries.iter().all(|e| e.title != "Product created #1"));
    }

    #[test]
    fn append_preserves_fields_and_assigns_id_and_timestamp() {
        let log = log();
        let stored = log
            .append(
                NewActivity::new(ActivityKind::TransferCreated, "Transfer created", "5 units")
                    .with_display("arrows", "blue"),
            )
            .unwrap();

        assert_eq!(stored.kind, ActivityKind::TransferCreated);
        assert_eq!(stored.title, "Transfer created");
        assert_eq!(stored.description, "5 units");
        assert_eq!(stored.icon, "arrows");
        assert_eq!(stored.color, "blue");
        assert!(!stored.id.is_empty());

        let read_back = log.read_all();
        assert_eq!(read_back[0], stored);
    }

    #[test]
    fn malformed_stored_list_degrades_to_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(KEY_RECENT_ACTIVITIES, "[{broken").unwrap();
        let log = ActivityLog::new(backend);

        assert!(log.read_all().is_empty());
        // A fresh append repairs the key.
        log.append(activity(1)).unwrap();
        assert_eq!(log.read_all().len(), 1);
    }
}

//! Recent-activity journal entry types.
//!
//! Entries are appended by mutation handlers across the app and kept in
//! a bounded, most-recent-first list (the log itself lives in
//! `stockdeck-store`).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Timestamp;

/// What kind of mutation produced an activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    InventoryCreated,
    InventoryUpdated,
    ProductCreated,
    ProductUpdated,
    ProductDeleted,
    TransferCreated,
    TransferUpdated,
}

/// A recorded activity, as persisted and displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Locally generated, time-ordered id (UUID v7).
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    /// Display hints carried through verbatim for the view layer.
    pub icon: String,
    pub color: String,
    pub timestamp: Timestamp,
}

/// An activity as submitted by a mutation handler; id and timestamp are
/// assigned at append time.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
}

impl NewActivity {
    pub fn new(kind: ActivityKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            icon: String::new(),
            color: String::new(),
        }
    }

    /// Attach display hints.
    pub fn with_display(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    /// Promote to a full entry with a fresh time-ordered id and the
    /// current timestamp.
    pub fn into_entry(self) -> ActivityEntry {
        ActivityEntry {
            id: Uuid::now_v7().to_string(),
            kind: self.kind,
            title: self.title,
            description: self.description,
            icon: self.icon,
            color: self.color,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_entry_assigns_fresh_id_and_timestamp() {
        let a = NewActivity::new(ActivityKind::ProductCreated, "Product created", "Widget")
            .with_display("box", "green")
            .into_entry();
        let b = NewActivity::new(ActivityKind::ProductCreated, "Product created", "Widget")
            .into_entry();

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.kind, ActivityKind::ProductCreated);
        assert_eq!(a.title, "Product created");
        assert_eq!(a.icon, "box");
        assert_eq!(a.color, "green");
    }

    #[test]
    fn kind_wire_strings_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&ActivityKind::TransferUpdated).unwrap(),
            "\"transfer_updated\""
        );
        let parsed: ActivityKind = serde_json::from_str("\"inventory_created\"").unwrap();
        assert_eq!(parsed, ActivityKind::InventoryCreated);
    }
}

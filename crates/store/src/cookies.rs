//! Cookie mirror: named values with absolute expiry.
//!
//! The edge router guard runs in a context where the durable store is
//! not readable, so the session token (and role list) are mirrored here
//! with a 7-day max-age. Reads of an expired cookie return `None`, the
//! same as an absent one.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::kv::{KeyValueStore, StoreError};

/// Max-age applied to every cookie written through the jar.
pub const COOKIE_MAX_AGE_DAYS: i64 = 7;

/// A stored cookie: value plus absolute expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CookieRecord {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Cookie store over a [`KeyValueStore`] backend, kept physically
/// separate from the durable session store.
#[derive(Clone)]
pub struct CookieJar {
    store: Arc<dyn KeyValueStore>,
}

impl CookieJar {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Set a cookie with the standard [`COOKIE_MAX_AGE_DAYS`] max-age.
    pub fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let record = CookieRecord {
            value: value.to_string(),
            expires_at: Utc::now() + Duration::days(COOKIE_MAX_AGE_DAYS),
        };
        let json = serde_json::to_string(&record)?;
        self.store.set(name, &json)
    }

    /// Read a cookie value. Expired or malformed records read as absent.
    pub fn get(&self, name: &str) -> Option<String> {
        let raw = self.store.get(name)?;
        let record: CookieRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(cookie = name, error = %e, "Malformed cookie record; treating as absent");
                return None;
            }
        };
        if record.expires_at <= Utc::now() {
            return None;
        }
        Some(record.value)
    }

    /// Remove a cookie. Removing an absent cookie is a no-op.
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        self.store.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn jar() -> (CookieJar, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (CookieJar::new(store.clone()), store)
    }

    #[test]
    fn set_then_get_round_trips() {
        let (jar, _) = jar();
        jar.set("token", "abc").unwrap();
        assert_eq!(jar.get("token").as_deref(), Some("abc"));
    }

    #[test]
    fn expired_cookie_reads_as_absent() {
        let (jar, store) = jar();
        let record = CookieRecord {
            value: "stale".to_string(),
            expires_at: Utc::now() - Duration::minutes(1),
        };
        store
            .set("token", &serde_json::to_string(&record).unwrap())
            .unwrap();
        assert_eq!(jar.get("token"), None);
    }

    #[test]
    fn malformed_cookie_reads_as_absent() {
        let (jar, store) = jar();
        store.set("token", "not-a-cookie-record").unwrap();
        assert_eq!(jar.get("token"), None);
    }

    #[test]
    fn remove_clears_the_cookie() {
        let (jar, _) = jar();
        jar.set("token", "abc").unwrap();
        jar.remove("token").unwrap();
        assert_eq!(jar.get("token"), None);
    }
}

//! `stockdeck-store` -- persistent client-side state.
//!
//! A durable key-value store, a cookie mirror with max-age expiry
//! (what the edge guard reads), the session store that owns both, and
//! the bounded recent-activity journal.
//!
//! No other crate touches storage directly; everything goes through
//! [`SessionStore`] and [`ActivityLog`].

pub mod activity_log;
pub mod cookies;
pub mod kv;
pub mod session;

pub use activity_log::{ActivityLog, MAX_ACTIVITY_ENTRIES};
pub use cookies::{CookieJar, COOKIE_MAX_AGE_DAYS};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use session::{PendingSignup, SessionStore};

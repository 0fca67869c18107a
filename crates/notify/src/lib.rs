//! `stockdeck-notify` -- in-process user notification hub.
//!
//! Every failure or success path that must reach the user publishes
//! here; any number of consumers (the terminal renderer, tests)
//! subscribe.

pub mod hub;

pub use hub::{Notification, NotificationHub, NotificationLevel, NOTIFICATION_TTL};

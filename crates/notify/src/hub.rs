//! Notification hub backed by a `tokio::sync::broadcast` channel.
//!
//! [`NotificationHub`] is shared via `Arc` across the application.
//! Publishing never fails: with zero subscribers the notification is
//! dropped (the tracing diagnostic still records it).

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

/// How long a notification stays displayable before consumers should
/// drop it.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A transient, auto-expiring user notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// True once the 5-second display window has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let ttl = chrono::Duration::from_std(NOTIFICATION_TTL)
            .unwrap_or_else(|_| chrono::Duration::seconds(5));
        now - self.created_at >= ttl
    }
}

/// Fan-out hub for user notifications.
pub struct NotificationHub {
    sender: broadcast::Sender<Notification>,
}

impl NotificationHub {
    /// Create a hub with a specific channel capacity. Slow receivers
    /// past the buffer observe `RecvError::Lagged` and miss the oldest
    /// notifications, which is acceptable for transient banners.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notification to all current subscribers.
    pub fn publish(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => {
                tracing::warn!(message = %notification.message, "User-facing error notification");
            }
            _ => {
                tracing::debug!(message = %notification.message, "User notification");
            }
        }
        // SendError only means there are zero receivers.
        let _ = self.sender.send(notification);
    }

    /// Shorthand for an info notification.
    pub fn info(&self, message: impl Into<String>) {
        self.publish(Notification::new(NotificationLevel::Info, message));
    }

    /// Shorthand for a success notification.
    pub fn success(&self, message: impl Into<String>) {
        self.publish(Notification::new(NotificationLevel::Success, message));
    }

    /// Shorthand for an error notification.
    pub fn error(&self, message: impl Into<String>) {
        self.publish(Notification::new(NotificationLevel::Error, message));
    }

    /// Subscribe to all notifications published on this hub.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let hub = NotificationHub::default();
        let mut rx = hub.subscribe();

        hub.error("Could not reach the server");

        let received = rx.recv().await.expect("should receive the notification");
        assert_eq!(received.level, NotificationLevel::Error);
        assert_eq!(received.message, "Could not reach the server");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_notification() {
        let hub = NotificationHub::default();
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        hub.success("Product created");

        assert_eq!(rx1.recv().await.unwrap().message, "Product created");
        assert_eq!(rx2.recv().await.unwrap().message, "Product created");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let hub = NotificationHub::default();
        hub.info("nobody is listening");
    }

    #[test]
    fn expiry_follows_the_five_second_window() {
        let n = Notification::new(NotificationLevel::Info, "hello");
        assert!(!n.is_expired(n.created_at + chrono::Duration::seconds(4)));
        assert!(n.is_expired(n.created_at + chrono::Duration::seconds(5)));
    }
}

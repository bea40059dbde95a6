//! User notification sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::UserNotification;

/// Trait for receiving user notifications.
///
/// Implementations translate notifications into platform-specific toasts.
/// Sync services emit through this trait and never wait on the result.
///
/// # Design Rules
///
/// - `notify()` must be fast and non-blocking (no network calls)
/// - Implementations should queue for async display if needed
/// - Failure to display must not affect sync operations (best-effort)
pub trait NotificationSink: Send + Sync {
    /// Emit a single notification.
    fn notify(&self, notification: UserNotification);
}

/// No-op implementation for tests or headless contexts.
#[derive(Clone, Default)]
pub struct NoOpNotificationSink;

impl NotificationSink for NoOpNotificationSink {
    fn notify(&self, _notification: UserNotification) {
        // Intentionally empty - notifications are discarded
    }
}

/// Mock sink for testing - collects emitted notifications.
#[derive(Clone, Default)]
pub struct MockNotificationSink {
    notifications: Arc<Mutex<Vec<UserNotification>>>,
}

impl MockNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected notifications.
    pub fn notifications(&self) -> Vec<UserNotification> {
        self.notifications.lock().unwrap().clone()
    }

    /// Clears collected notifications.
    pub fn clear(&self) {
        self.notifications.lock().unwrap().clear();
    }

    /// Returns the number of collected notifications.
    pub fn len(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    /// Returns true if no notifications have been collected.
    pub fn is_empty(&self) -> bool {
        self.notifications.lock().unwrap().is_empty()
    }
}

impl NotificationSink for MockNotificationSink {
    fn notify(&self, notification: UserNotification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

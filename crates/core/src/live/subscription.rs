//! Push channel subscription lifecycle.

use std::sync::{Arc, Mutex};

use log::{debug, error};

use crate::pubsub::{NotificationHandler, PubSubClient};

/// An active attachment to a named topic plus its registered handler.
///
/// At most one lives per manager; it is consumed on deactivation.
struct SubscriptionHandle {
    topic: String,
    handler: Arc<dyn NotificationHandler>,
}

/// Owns the channel subscription lifecycle.
///
/// `activate` must be called at most once per activation cycle; calling
/// it while already active is a caller error and is not defended against
/// beyond a debug assertion. `deactivate` is idempotent and never
/// propagates failures: teardown always completes.
pub struct SubscriptionManager {
    bus: Arc<dyn PubSubClient>,
    active: Mutex<Option<SubscriptionHandle>>,
}

impl SubscriptionManager {
    pub fn new(bus: Arc<dyn PubSubClient>) -> Self {
        Self {
            bus,
            active: Mutex::new(None),
        }
    }

    /// Attaches to `topic` and registers `handler` as the single
    /// notification listener.
    ///
    /// Notifications arriving from this point on are delivered to the
    /// handler unconditionally; there is no suppression window before
    /// the first pull completes.
    pub fn activate(
        &self,
        topic: &str,
        handler: Arc<dyn NotificationHandler>,
    ) -> crate::errors::Result<()> {
        let mut active = self.active.lock().unwrap();
        debug_assert!(
            active.is_none(),
            "activate called while a subscription is already active"
        );

        self.bus.subscribe(topic, Arc::clone(&handler))?;
        debug!("Subscribed to push channel '{}'", topic);
        *active = Some(SubscriptionHandle {
            topic: topic.to_string(),
            handler,
        });
        Ok(())
    }

    /// Detaches the channel and removes the listener.
    ///
    /// Safe to call when never activated or already deactivated. A
    /// failing detach is logged and swallowed.
    pub fn deactivate(&self) {
        let handle = self.active.lock().unwrap().take();
        let Some(handle) = handle else {
            return;
        };

        if let Err(err) = self.bus.unsubscribe(&handle.topic, &handle.handler) {
            error!(
                "Error cleaning up subscription to '{}': {}",
                handle.topic, err
            );
        } else {
            debug!("Unsubscribed from push channel '{}'", handle.topic);
        }
    }

    /// Whether a subscription is currently active.
    pub fn is_active(&self) -> bool {
        self.active.lock().unwrap().is_some()
    }
}

impl Drop for SubscriptionManager {
    fn drop(&mut self) {
        self.deactivate();
    }
}

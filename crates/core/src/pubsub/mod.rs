//! Push channel abstraction.
//!
//! The backend broadcasts order summary updates on a named topic. This
//! module defines the wire types for those notifications and the
//! [`PubSubClient`] seam the subscription manager talks to, so any real
//! transport (WebSocket, SSE, long-poll) can be substituted without
//! touching the sync logic. [`LocalBus`] is an in-process implementation
//! used by tests and embeddings.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::summary::{SummaryLine, SummaryPatch};

/// A raw notification as delivered by the push channel.
///
/// Ephemeral: decoded, dispatched, and dropped. `payload` stays untyped
/// here because unrecognized kinds must be ignored without error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNotification {
    /// Notification kind; the dispatcher only recognizes `stock_update`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Kind-specific payload.
    pub payload: serde_json::Value,
}

/// Decoded payload of a recognized notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdatePayload {
    /// Complete current dataset; replaces local state wholesale.
    FullUpdate {
        #[serde(default)]
        data: Option<Vec<SummaryLine>>,
    },
    /// Per-line patches to merge into existing state (the backend reuses
    /// the `stock_update` tag for the incremental shape).
    StockUpdate { payload: Vec<SummaryPatch> },
}

impl RawNotification {
    /// Decodes the payload, or `None` when it has an unrecognized tag or
    /// missing fields (malformed notifications are silently ignored).
    pub fn decode_payload(&self) -> Option<UpdatePayload> {
        match serde_json::from_value(self.payload.clone()) {
            Ok(payload) => Some(payload),
            Err(err) => {
                debug!("Ignoring undecodable notification payload: {}", err);
                None
            }
        }
    }
}

/// Callback registered on a topic.
///
/// Handlers receive notifications in delivery order and run to completion
/// without suspension; heavy work belongs elsewhere.
pub trait NotificationHandler: Send + Sync {
    fn handle(&self, notifications: &[RawNotification]);
}

/// Abstract pub/sub transport.
///
/// The subscription manager owns attach/detach through this trait; the
/// transport is assumed to deliver at least once per notification on a
/// named topic. Implementations must tolerate unsubscribing a handler
/// that was never subscribed.
pub trait PubSubClient: Send + Sync {
    /// Attach to `topic` and register `handler` for its notifications.
    fn subscribe(&self, topic: &str, handler: Arc<dyn NotificationHandler>) -> Result<()>;

    /// Detach `handler` from `topic`.
    fn unsubscribe(&self, topic: &str, handler: &Arc<dyn NotificationHandler>) -> Result<()>;
}

/// In-process pub/sub bus.
///
/// Delivers synchronously on the publisher's task. Used by tests and by
/// embeddings that generate notifications locally; it is not a network
/// transport.
#[derive(Default)]
pub struct LocalBus {
    topics: Mutex<HashMap<String, Vec<Arc<dyn NotificationHandler>>>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers a batch of notifications to every handler on `topic`.
    pub fn publish(&self, topic: &str, notifications: &[RawNotification]) {
        let handlers: Vec<Arc<dyn NotificationHandler>> = {
            let topics = self.topics.lock().unwrap();
            topics.get(topic).cloned().unwrap_or_default()
        };
        for handler in handlers {
            handler.handle(notifications);
        }
    }

    /// Number of handlers currently attached to `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .lock()
            .unwrap()
            .get(topic)
            .map_or(0, |handlers| handlers.len())
    }
}

impl PubSubClient for LocalBus {
    fn subscribe(&self, topic: &str, handler: Arc<dyn NotificationHandler>) -> Result<()> {
        let mut topics = self.topics.lock().unwrap();
        topics.entry(topic.to_string()).or_default().push(handler);
        Ok(())
    }

    fn unsubscribe(&self, topic: &str, handler: &Arc<dyn NotificationHandler>) -> Result<()> {
        let mut topics = self.topics.lock().unwrap();
        if let Some(handlers) = topics.get_mut(topic) {
            handlers.retain(|h| !Arc::ptr_eq(h, handler));
            if handlers.is_empty() {
                topics.remove(topic);
            }
        } else {
            debug!("Unsubscribe from '{}' with no active subscription", topic);
        }
        Ok(())
    }
}

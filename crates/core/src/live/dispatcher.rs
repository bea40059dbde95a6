//! Push notification dispatch.

use std::sync::Arc;

use log::{debug, info};

use crate::constants::STOCK_UPDATE_KIND;
use crate::events::{NotificationSink, UserNotification};
use crate::pubsub::{NotificationHandler, RawNotification, UpdatePayload};
use crate::summary::SummaryStore;

/// Receives raw push notifications, classifies them, and routes them to
/// the store.
///
/// Notifications are processed in array order; a full update replaces the
/// collection wholesale, a partial update merges patches in listed order.
/// Unrecognized kinds and undecodable payloads are ignored without error.
/// Runs to completion without suspension once invoked.
pub struct UpdateDispatcher {
    store: Arc<SummaryStore>,
    sink: Arc<dyn NotificationSink>,
}

impl UpdateDispatcher {
    pub fn new(store: Arc<SummaryStore>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { store, sink }
    }

    fn apply_full_update(&self, data: Option<Vec<crate::summary::SummaryLine>>) {
        let count = self.store.replace_all(data.unwrap_or_default());
        self.store.touch_last_update();
        info!("Full order summary update applied: {} lines", count);
        self.sink.notify(
            UserNotification::info("Order summary updated in real-time")
                .with_title("Data Updated"),
        );
    }

    fn apply_partial_update(&self, patches: Vec<crate::summary::SummaryPatch>) {
        let updated = self.store.apply_patch(&patches);
        for line in &updated {
            self.sink.notify(UserNotification::info(format!(
                "Product '{}' quantity updated",
                line.template_name
            )));
        }
        if !updated.is_empty() {
            self.store.touch_last_update();
            info!("Partial order summary update applied: {} lines", updated.len());
        }
    }
}

impl NotificationHandler for UpdateDispatcher {
    fn handle(&self, notifications: &[RawNotification]) {
        for notification in notifications {
            if notification.kind != STOCK_UPDATE_KIND {
                continue;
            }
            match notification.decode_payload() {
                Some(UpdatePayload::FullUpdate { data }) => self.apply_full_update(data),
                Some(UpdatePayload::StockUpdate { payload }) => self.apply_partial_update(payload),
                None => debug!("Ignoring unrecognized stock_update payload"),
            }
        }
    }
}

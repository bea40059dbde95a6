//! Pull-based data loading.

use std::sync::Arc;

use log::{error, info, warn};

use crate::constants::BEARER_TOKEN_SECRET_KEY;
use crate::errors::Error;
use crate::events::{NotificationSink, UserNotification};
use crate::secrets::SecretStore;
use crate::summary::SummaryStore;

use super::fetcher::SummaryFetcher;

/// Performs the on-demand pull and normalizes every outcome into store
/// updates and user notifications.
///
/// `load()` is terminal for errors: nothing propagates to the caller.
/// The loading flag is held by an RAII guard, so it clears on every exit
/// path. Safe to call concurrently with push-driven merges; the store
/// serializes its own mutations and the most recently completed write
/// wins (there is no staleness check).
pub struct SummaryLoader {
    fetcher: Arc<dyn SummaryFetcher>,
    store: Arc<SummaryStore>,
    sink: Arc<dyn NotificationSink>,
    secrets: Option<Arc<dyn SecretStore>>,
}

impl SummaryLoader {
    /// Creates a loader that fetches without authentication.
    pub fn new(
        fetcher: Arc<dyn SummaryFetcher>,
        store: Arc<SummaryStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            fetcher,
            store,
            sink,
            secrets: None,
        }
    }

    /// Requires a bearer token from `secrets` before each pull. A store
    /// that yields no token makes the pull a reported no-op.
    pub fn with_secret_store(mut self, secrets: Arc<dyn SecretStore>) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Performs one pull request and merges the outcome.
    ///
    /// On success the collection is replaced wholesale and `last_update`
    /// is set. On any failure the collection is untouched and the error
    /// is surfaced through the notification sink.
    pub async fn load(&self) {
        let _loading = self.store.begin_loading();

        let token = match self.resolve_token() {
            Ok(token) => token,
            Err(err) => {
                warn!("Pull skipped: {}", err);
                self.sink.notify(UserNotification::danger(
                    "Authentication token not found. Please log in.",
                ));
                return;
            }
        };

        match self.fetcher.fetch_summary(token.as_deref()).await {
            Ok(lines) => {
                let count = self.store.replace_all(lines);
                self.store.touch_last_update();
                info!("Order summary loaded: {} lines", count);
            }
            Err(Error::Server { message }) => {
                warn!("Order summary load rejected by server: {}", message);
                self.sink
                    .notify(UserNotification::danger(format!("Error: {}", message)));
            }
            Err(Error::Transport(message)) => {
                warn!("Order summary load failed: {}", message);
                self.sink.notify(UserNotification::danger(format!(
                    "Network error: {}",
                    message
                )));
            }
            Err(err) => {
                warn!("Order summary load failed: {}", err);
                self.sink
                    .notify(UserNotification::danger("Failed to load order summary data"));
            }
        }
    }

    /// Resolves the bearer token. `Ok(None)` means unauthenticated fetch
    /// (no secret store configured); `Err` means a store is configured
    /// but no usable token is available.
    fn resolve_token(&self) -> crate::errors::Result<Option<String>> {
        let Some(secrets) = &self.secrets else {
            return Ok(None);
        };
        match secrets.get_secret(BEARER_TOKEN_SECRET_KEY) {
            Ok(Some(token)) => Ok(Some(token)),
            Ok(None) => Err(Error::AuthMissing),
            Err(err) => {
                error!("Secret store lookup failed: {}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::errors::Result;
    use crate::events::{MockNotificationSink, NotificationKind};
    use crate::secrets::InMemorySecretStore;
    use crate::summary::SummaryLine;

    /// Scripted fetcher: pops the next queued outcome per call.
    struct ScriptedFetcher {
        outcomes: Mutex<Vec<Result<Vec<SummaryLine>>>>,
    }

    impl ScriptedFetcher {
        fn new(outcomes: Vec<Result<Vec<SummaryLine>>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
            }
        }
    }

    #[async_trait]
    impl SummaryFetcher for ScriptedFetcher {
        async fn fetch_summary(&self, _bearer_token: Option<&str>) -> Result<Vec<SummaryLine>> {
            self.outcomes
                .lock()
                .unwrap()
                .remove(0)
        }
    }

    fn line(product_id: i64, name: &str) -> SummaryLine {
        SummaryLine {
            product_id,
            template_id: product_id,
            template_name: name.to_string(),
            default_code: None,
            ordered_quantity: 1.0,
            manufactured_quantity: 0.0,
            delivered_quantity: 0.0,
        }
    }

    fn loader_with(
        outcomes: Vec<Result<Vec<SummaryLine>>>,
    ) -> (SummaryLoader, Arc<SummaryStore>, Arc<MockNotificationSink>) {
        let store = Arc::new(SummaryStore::new());
        let sink = Arc::new(MockNotificationSink::new());
        let loader = SummaryLoader::new(
            Arc::new(ScriptedFetcher::new(outcomes)),
            Arc::clone(&store),
            sink.clone(),
        );
        (loader, store, sink)
    }

    #[tokio::test]
    async fn test_load_success_replaces_collection_and_touches_timestamp() {
        let (loader, store, sink) = loader_with(vec![Ok(vec![line(1, "A"), line(2, "B")])]);

        loader.load().await;

        assert_eq!(store.len(), 2);
        assert!(store.last_update().is_some());
        assert!(!store.is_loading());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_load_transport_failure_leaves_collection_untouched() {
        let (loader, store, sink) = loader_with(vec![
            Ok(vec![line(1, "A")]),
            Err(Error::transport("connection refused")),
        ]);

        loader.load().await;
        let before = store.lines();
        let last_update = store.last_update();

        loader.load().await;

        assert_eq!(store.lines(), before);
        assert_eq!(store.last_update(), last_update);
        assert!(!store.is_loading());

        let notifications = sink.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Danger);
        assert!(notifications[0].message.starts_with("Network error:"));
    }

    #[tokio::test]
    async fn test_load_server_error_surfaces_embedded_message() {
        let (loader, store, sink) =
            loader_with(vec![Err(Error::server("Invalid format for delivery_ids"))]);

        loader.load().await;

        assert!(store.is_empty());
        let notifications = sink.notifications();
        assert_eq!(
            notifications[0].message,
            "Error: Invalid format for delivery_ids"
        );
    }

    #[tokio::test]
    async fn test_load_with_missing_token_is_reported_and_skipped() {
        let store = Arc::new(SummaryStore::new());
        let sink = Arc::new(MockNotificationSink::new());
        let loader = SummaryLoader::new(
            Arc::new(ScriptedFetcher::new(vec![Ok(vec![line(1, "A")])])),
            Arc::clone(&store),
            sink.clone(),
        )
        .with_secret_store(Arc::new(InMemorySecretStore::new()));

        loader.load().await;

        // Fetch never ran: the collection stays empty and the queued
        // outcome is still in place.
        assert!(store.is_empty());
        assert!(!store.is_loading());
        let notifications = sink.notifications();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.contains("Authentication token"));
    }

    #[tokio::test]
    async fn test_load_with_token_present_fetches() {
        let secrets = Arc::new(InMemorySecretStore::new());
        secrets.set_secret(BEARER_TOKEN_SECRET_KEY, "jwt-token");

        let store = Arc::new(SummaryStore::new());
        let sink = Arc::new(MockNotificationSink::new());
        let loader = SummaryLoader::new(
            Arc::new(ScriptedFetcher::new(vec![Ok(vec![line(1, "A")])])),
            Arc::clone(&store),
            sink.clone(),
        )
        .with_secret_store(secrets);

        loader.load().await;

        assert_eq!(store.len(), 1);
        assert!(sink.is_empty());
    }
}

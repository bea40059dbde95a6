//! Live summary orchestration.

use std::sync::Arc;
use std::time::Duration;

use log::{error, info};

use crate::constants::{DEFAULT_REFRESH_INTERVAL, ORDER_SUMMARY_CHANNEL};
use crate::events::NotificationSink;
use crate::pubsub::{NotificationHandler, PubSubClient};
use crate::secrets::SecretStore;
use crate::summary::SummaryStore;

use super::dispatcher::UpdateDispatcher;
use super::fetcher::SummaryFetcher;
use super::loader::SummaryLoader;
use super::scheduler::RefreshScheduler;
use super::subscription::SubscriptionManager;

/// Tunables for a live summary view.
#[derive(Debug, Clone)]
pub struct LiveSummaryConfig {
    /// Push channel to subscribe to.
    pub channel: String,
    /// Backstop refresh period.
    pub refresh_interval: Duration,
}

impl Default for LiveSummaryConfig {
    fn default() -> Self {
        Self {
            channel: ORDER_SUMMARY_CHANNEL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

/// Wires the store, loader, dispatcher, subscription, and backstop
/// refresh into one activation lifecycle.
///
/// Activation order: attach the push channel first (no suppression
/// window: pushes arriving before the first pull completes are merged as
/// normal), then perform the initial pull, then start the backstop
/// refresh. Deactivation detaches the channel and cancels the refresh;
/// a pull already in flight completes and may still write the store.
///
/// Both `activate` and `deactivate` are infallible at this boundary:
/// every failure is surfaced as a user notification or a log entry.
pub struct LiveSummaryService {
    config: LiveSummaryConfig,
    store: Arc<SummaryStore>,
    loader: Arc<SummaryLoader>,
    dispatcher: Arc<UpdateDispatcher>,
    subscription: SubscriptionManager,
    scheduler: RefreshScheduler,
}

impl LiveSummaryService {
    pub fn new(
        config: LiveSummaryConfig,
        bus: Arc<dyn PubSubClient>,
        fetcher: Arc<dyn SummaryFetcher>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self::build(config, bus, fetcher, sink, None)
    }

    /// Like [`new`](Self::new), but pulls authenticate with a bearer
    /// token from `secrets`.
    pub fn with_secret_store(
        config: LiveSummaryConfig,
        bus: Arc<dyn PubSubClient>,
        fetcher: Arc<dyn SummaryFetcher>,
        sink: Arc<dyn NotificationSink>,
        secrets: Arc<dyn SecretStore>,
    ) -> Self {
        Self::build(config, bus, fetcher, sink, Some(secrets))
    }

    fn build(
        config: LiveSummaryConfig,
        bus: Arc<dyn PubSubClient>,
        fetcher: Arc<dyn SummaryFetcher>,
        sink: Arc<dyn NotificationSink>,
        secrets: Option<Arc<dyn SecretStore>>,
    ) -> Self {
        let store = Arc::new(SummaryStore::new());
        let mut loader = SummaryLoader::new(fetcher, Arc::clone(&store), Arc::clone(&sink));
        if let Some(secrets) = secrets {
            loader = loader.with_secret_store(secrets);
        }
        let dispatcher = Arc::new(UpdateDispatcher::new(Arc::clone(&store), sink));

        Self {
            config,
            store,
            loader: Arc::new(loader),
            dispatcher,
            subscription: SubscriptionManager::new(bus),
            scheduler: RefreshScheduler::new(),
        }
    }

    /// The store backing this view, for rendering layers.
    pub fn store(&self) -> Arc<SummaryStore> {
        Arc::clone(&self.store)
    }

    /// Attaches the push channel, performs the initial pull, and starts
    /// the backstop refresh.
    ///
    /// Must be called at most once per activation cycle (caller
    /// discipline, matching [`SubscriptionManager::activate`]).
    pub async fn activate(&self) {
        let handler: Arc<dyn NotificationHandler> = Arc::<UpdateDispatcher>::clone(&self.dispatcher);
        if let Err(err) = self.subscription.activate(&self.config.channel, handler) {
            // Real-time updates are an enhancement; pulls still work.
            error!("Failed to set up real-time updates: {}", err);
        }

        self.loader.load().await;

        let loader = Arc::clone(&self.loader);
        self.scheduler
            .start(self.config.refresh_interval, move || {
                let loader = Arc::clone(&loader);
                async move {
                    loader.load().await;
                }
            });

        info!(
            "Live order summary activated on channel '{}'",
            self.config.channel
        );
    }

    /// Detaches the channel and stops the backstop refresh. Idempotent;
    /// after this returns no push merge or scheduled pull begins.
    pub fn deactivate(&self) {
        self.subscription.deactivate();
        self.scheduler.stop();
        info!("Live order summary deactivated");
    }
}

impl Drop for LiveSummaryService {
    fn drop(&mut self) {
        self.scheduler.stop();
    }
}

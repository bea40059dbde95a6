//! Live synchronization of the order summary view.
//!
//! This module keeps the [`SummaryStore`](crate::summary::SummaryStore)
//! synchronized with the backend through two concurrent channels:
//!
//! - [`loader`] - On-demand pull through the [`fetcher`] seam
//! - [`dispatcher`] - Push notifications merged as they arrive
//! - [`subscription`] - Push channel attach/detach lifecycle
//! - [`scheduler`] - Periodic backstop pull masking missed pushes
//! - [`service`] - The activation lifecycle wiring it all together
//!
//! # Consistency
//!
//! There is no ordering or versioning guard between concurrent pulls and
//! push-driven merges: the most recently *completed* store write wins,
//! regardless of which operation started first. A slow full pull can
//! therefore overwrite a newer push-delivered partial update. The next
//! backstop pull converges the store either way; adding a version or
//! timestamp field to the data model would be the fix if it ever
//! matters.

pub mod dispatcher;
pub mod fetcher;
pub mod loader;
pub mod scheduler;
pub mod service;
pub mod subscription;

pub use dispatcher::UpdateDispatcher;
pub use fetcher::SummaryFetcher;
pub use loader::SummaryLoader;
pub use scheduler::RefreshScheduler;
pub use service::{LiveSummaryConfig, LiveSummaryService};
pub use subscription::SubscriptionManager;

//! Ordersync Core - Domain types and live synchronization services.
//!
//! This crate keeps an ordered collection of order/stock summary lines
//! synchronized with a backend through an on-demand pull and a push
//! channel, with a periodic pull as backstop. It is transport-agnostic:
//! the pull side is behind the [`live::SummaryFetcher`] trait
//! (implemented by the `ordersync-api-client` crate) and the push side
//! behind [`pubsub::PubSubClient`].

pub mod constants;
pub mod errors;
pub mod events;
pub mod live;
pub mod pubsub;
pub mod secrets;
pub mod summary;

// Re-export common types
pub use summary::{SummaryLine, SummaryPatch, SummaryStore};

// Re-export error types
pub use errors::Error;
pub use errors::Result;

//! Ordersync API Client - HTTP pull transport for the order summary API.
//!
//! This crate implements the `SummaryFetcher` seam from `ordersync-core`
//! against the REST endpoint, normalizing the legacy response envelopes
//! into domain types.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ordersync_api_client::SummaryApiClient;
//!
//! let client = SummaryApiClient::new("https://erp.example.com");
//! let lines = client
//!     .fetch_order_summary(Some("access_token"), &Default::default())
//!     .await?;
//! ```

mod client;
mod error;
mod types;

pub use client::SummaryApiClient;
pub use error::{ApiClientError, Result};
pub use types::SummaryFilter;

//! Pull transport seam.

use async_trait::async_trait;

use crate::errors::Result;
use crate::summary::SummaryLine;

/// Fetches the current order summary dataset from the backend.
///
/// Implemented by the HTTP adapter crate; the loader stays transport
/// agnostic. Errors must map into the core taxonomy: a well-formed error
/// envelope becomes [`Error::Server`](crate::Error::Server), anything
/// else transport-level becomes [`Error::Transport`](crate::Error::Transport).
#[async_trait]
pub trait SummaryFetcher: Send + Sync {
    /// Performs one pull, optionally authenticated with a bearer token.
    async fn fetch_summary(&self, bearer_token: Option<&str>) -> Result<Vec<SummaryLine>>;
}

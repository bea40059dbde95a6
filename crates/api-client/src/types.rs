//! Types for order summary API requests and responses.

use serde::Deserialize;

use ordersync_core::SummaryLine;

/// Optional query filters for the order summary endpoint.
///
/// The backend accepts id lists in the `[1,2,3]` format.
#[derive(Debug, Clone, Default)]
pub struct SummaryFilter {
    /// Restrict the summary to these product template ids.
    pub product_templates: Vec<i64>,
    /// Restrict delivered quantities to these delivery (picking) ids.
    pub delivery_ids: Vec<i64>,
}

impl SummaryFilter {
    pub fn is_empty(&self) -> bool {
        self.product_templates.is_empty() && self.delivery_ids.is_empty()
    }
}

/// Success envelope variants the API has shipped over time: a wrapped
/// `{ success, data }` object or a bare array of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SummaryResponse {
    Wrapped(WrappedResponse),
    Bare(Vec<SummaryLine>),
}

/// The wrapped response shape, which may also carry an error message
/// with `success: false`.
#[derive(Debug, Deserialize)]
pub(crate) struct WrappedResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<SummaryLine>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: String,
}

/// Formats an id list the way the backend parses it: `[1,2,3]`.
pub(crate) fn format_id_list(ids: &[i64]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("[{}]", joined)
}

//! HTTP client for the order summary REST API.
//!
//! The endpoint has shipped two success shapes over its life: a bare
//! array of summary lines and a `{ success, data }` wrapper; errors come
//! as `{ error }` envelopes with a non-2xx status or `success: false`.
//! This client normalizes all of them.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

use ordersync_core::live::SummaryFetcher;
use ordersync_core::SummaryLine;

use crate::error::{ApiClientError, Result};
use crate::types::{format_id_list, ApiErrorResponse, SummaryFilter, SummaryResponse};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Order summary endpoint path.
const ORDER_SUMMARY_PATH: &str = "/api/v1/order-summary";

/// Client for the order summary REST API.
#[derive(Debug, Clone)]
pub struct SummaryApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl SummaryApiClient {
    /// Create a new API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the backend (e.g., "https://erp.example.com")
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create headers for an API request with an optional bearer token.
    fn headers(&self, token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiClientError::auth("Invalid access token format"))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Fetch the current order summary.
    ///
    /// GET /api/v1/order-summary
    pub async fn fetch_order_summary(
        &self,
        token: Option<&str>,
        filter: &SummaryFilter,
    ) -> Result<Vec<SummaryLine>> {
        let url = format!("{}{}", self.base_url, ORDER_SUMMARY_PATH);

        let mut request = self.client.get(&url).headers(self.headers(token)?);
        if !filter.product_templates.is_empty() {
            request = request.query(&[(
                "product_templates",
                format_id_list(&filter.product_templates),
            )]);
        }
        if !filter.delivery_ids.is_empty() {
            request = request.query(&[("delivery_ids", format_id_list(&filter.delivery_ids))]);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Order summary response ({}): {} bytes", status, body.len());

        parse_summary_body(status, &body)
    }
}

/// Decodes a response body into summary lines.
///
/// Split from the request path so envelope handling is testable without
/// a server.
fn parse_summary_body(status: u16, body: &str) -> Result<Vec<SummaryLine>> {
    if !(200..300).contains(&status) {
        // Try to surface the server's own message.
        if let Ok(envelope) = serde_json::from_str::<ApiErrorResponse>(body) {
            return Err(ApiClientError::api(status, envelope.error));
        }
        return Err(ApiClientError::api(
            status,
            "Failed to load order summary data",
        ));
    }

    match serde_json::from_str::<SummaryResponse>(body)? {
        SummaryResponse::Bare(lines) => Ok(lines),
        SummaryResponse::Wrapped(wrapped) => {
            if wrapped.success {
                Ok(wrapped.data.unwrap_or_default())
            } else {
                Err(ApiClientError::api(
                    status,
                    wrapped
                        .error
                        .unwrap_or_else(|| "Failed to load order summary.".to_string()),
                ))
            }
        }
    }
}

#[async_trait]
impl SummaryFetcher for SummaryApiClient {
    async fn fetch_summary(
        &self,
        bearer_token: Option<&str>,
    ) -> ordersync_core::Result<Vec<SummaryLine>> {
        self.fetch_order_summary(bearer_token, &SummaryFilter::default())
            .await
            .map_err(Into::into)
    }
}

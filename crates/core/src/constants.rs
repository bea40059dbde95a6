use std::time::Duration;

/// Push channel carrying order summary updates. Must match the channel
/// the backend broadcasts on.
pub const ORDER_SUMMARY_CHANNEL: &str = "order_summary_updates";

/// Notification kind recognized by the dispatcher; everything else on
/// the channel is ignored.
pub const STOCK_UPDATE_KIND: &str = "stock_update";

/// Backstop refresh interval between periodic re-pulls.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Secret store key under which the bearer token is looked up.
pub const BEARER_TOKEN_SECRET_KEY: &str = "api_bearer_token";

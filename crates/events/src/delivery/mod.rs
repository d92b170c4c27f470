//! Outbound HTTP plumbing shared by the directory and sink transports.

use std::time::Duration;

pub mod sink;

/// HTTP request timeout for a single outbound call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client used by the remote transports.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// Strip trailing slashes so paths can be appended with `format!`.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

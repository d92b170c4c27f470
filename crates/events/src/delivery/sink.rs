//! Notification sink transport.
//!
//! [`HttpNotificationSink`] posts a JSON-encoded [`NewNotification`] to the
//! notifications service. There is no retry: the dispatcher attempts each
//! recipient once and records the outcome.

use async_trait::async_trait;
use eventhub_core::notification::NotificationType;
use eventhub_core::types::DbId;
use serde::{Deserialize, Serialize};

use super::{http_client, normalize_base_url, REQUEST_TIMEOUT};

// ---------------------------------------------------------------------------
// NewNotification
// ---------------------------------------------------------------------------

/// Notification record as accepted by `POST /notifications`.
///
/// The sink assigns the creation timestamp and the unread flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    /// Recipient directory user id.
    pub participant_id: DbId,
    /// Related event, if any.
    pub event_id: Option<DbId>,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
}

impl NewNotification {
    pub fn new(
        participant_id: DbId,
        event_id: Option<DbId>,
        kind: NotificationType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            participant_id,
            event_id,
            kind,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for sink submission failures.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The sink returned a non-2xx status code.
    #[error("Notification sink returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Destination for notification records.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn submit(&self, notification: &NewNotification) -> Result<(), SinkError>;
}

// ---------------------------------------------------------------------------
// HttpNotificationSink
// ---------------------------------------------------------------------------

/// Submits notifications to the notifications service over HTTP.
pub struct HttpNotificationSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotificationSink {
    /// Create a sink posting to `{base_url}/notifications`.
    pub fn new(base_url: &str) -> Result<Self, SinkError> {
        Ok(Self::with_client(http_client(REQUEST_TIMEOUT)?, base_url))
    }

    /// Create a sink sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/notifications", normalize_base_url(base_url)),
        }
    }

    /// Full URL notifications are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn submit(&self, notification: &NewNotification) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(notification)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SinkError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

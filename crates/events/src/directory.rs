//! Participant directory lookups.
//!
//! [`Directory`] is the raw transport and reports every failure.
//! [`DirectoryClient`] wraps it with the soft-failure policy used by the
//! workflows: any error is logged and mapped to "absent" (`None` or an
//! empty list). Profiles are never cached; every fan-out re-resolves.

use std::sync::Arc;

use async_trait::async_trait;
use eventhub_core::roles::Role;
use eventhub_core::types::DbId;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::delivery::{http_client, normalize_base_url, REQUEST_TIMEOUT};

// ---------------------------------------------------------------------------
// ParticipantProfile
// ---------------------------------------------------------------------------

/// Public profile of a directory user.
///
/// Every field is optional: directory data integrity is not guaranteed, and
/// message templates carry their own fallbacks for missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantProfile {
    pub id: Option<DbId>,
    pub email: Option<String>,
    #[serde(alias = "fullName")]
    pub display_name: Option<String>,
    pub role: Option<String>,
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for directory lookups.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Transport or response decoding failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The directory returned an unexpected status code.
    #[error("Directory returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Directory transport
// ---------------------------------------------------------------------------

/// Read-only source of directory profiles.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Profile by user id; `Ok(None)` when the directory does not know it.
    async fn profile(&self, id: DbId) -> Result<Option<ParticipantProfile>, DirectoryError>;

    /// All users holding `role`.
    async fn profiles_with_role(&self, role: Role)
        -> Result<Vec<ParticipantProfile>, DirectoryError>;
}

/// Directory served over HTTP.
///
/// ```text
/// GET {base}/users/{id}           -> ParticipantProfile | 404
/// GET {base}/users?role={ROLE}    -> [ParticipantProfile]
/// ```
pub struct HttpDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDirectory {
    pub fn new(base_url: &str) -> Result<Self, DirectoryError> {
        Ok(Self::with_client(http_client(REQUEST_TIMEOUT)?, base_url))
    }

    /// Create a directory sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }
}

#[async_trait]
impl Directory for HttpDirectory {
    async fn profile(&self, id: DbId) -> Result<Option<ParticipantProfile>, DirectoryError> {
        let url = format!("{}/users/{id}", self.base_url);
        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(DirectoryError::HttpStatus(response.status().as_u16()));
        }
        Ok(Some(response.json().await?))
    }

    async fn profiles_with_role(
        &self,
        role: Role,
    ) -> Result<Vec<ParticipantProfile>, DirectoryError> {
        let url = format!("{}/users", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("role", role.as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(DirectoryError::HttpStatus(response.status().as_u16()));
        }
        // A `null` body is treated like an empty list.
        let profiles: Option<Vec<ParticipantProfile>> = response.json().await?;
        Ok(profiles.unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// DirectoryClient
// ---------------------------------------------------------------------------

/// Soft-failing facade over a [`Directory`].
#[derive(Clone)]
pub struct DirectoryClient {
    directory: Arc<dyn Directory>,
}

impl DirectoryClient {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    /// Resolve a user's profile, or `None` if it cannot be resolved for
    /// any reason.
    pub async fn fetch_profile(&self, id: DbId) -> Option<ParticipantProfile> {
        match self.directory.profile(id).await {
            Ok(Some(profile)) => Some(profile),
            Ok(None) => {
                tracing::debug!(user_id = id, "Directory has no profile for user");
                None
            }
            Err(e) => {
                tracing::warn!(
                    operation = "fetch_profile",
                    user_id = id,
                    error = %e,
                    "Directory lookup failed, continuing without profile"
                );
                None
            }
        }
    }

    /// List users holding `role`, or an empty list on any failure.
    pub async fn fetch_by_role(&self, role: Role) -> Vec<ParticipantProfile> {
        match self.directory.profiles_with_role(role).await {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::warn!(
                    operation = "fetch_by_role",
                    role = %role,
                    error = %e,
                    "Directory listing failed, continuing with no recipients"
                );
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Registration entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use eventhub_core::registration::RegistrationStatus;
use eventhub_core::types::{DbId, Timestamp};

/// A row from the `registrations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub event_id: DbId,
    pub participant_id: DbId,
    pub registered_at: Timestamp,
    #[sqlx(try_from = "String")]
    pub status: RegistrationStatus,
}

/// Request to register a participant to an event.
///
/// `status` defaults to `REGISTERED` when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRegistration {
    pub event_id: DbId,
    pub participant_id: DbId,
    #[serde(default)]
    pub status: Option<RegistrationStatus>,
}

/// Fully-resolved registration ready to be inserted.
#[derive(Debug, Clone)]
pub struct CreateRegistration {
    pub event_id: DbId,
    pub participant_id: DbId,
    pub registered_at: Timestamp,
    pub status: RegistrationStatus,
}

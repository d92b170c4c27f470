//! Store seams consumed by the workflows.
//!
//! [`EventStore`] and [`RegistrationStore`] abstract the persistent store
//! so the registration and publication workflows can run against
//! PostgreSQL ([`PgStore`]) or memory ([`MemoryStore`](crate::MemoryStore)).

use async_trait::async_trait;
use eventhub_core::error::CoreError;
use eventhub_core::types::DbId;

use crate::models::event::{CreateEvent, Event, EventFilter};
use crate::models::registration::{CreateRegistration, Registration};
use crate::repositories::{EventRepo, RegistrationRepo};
use crate::DbPool;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("Duplicate value violates unique constraint: {0}")]
    Duplicate(String),

    /// The backend failed (connection, query, decoding, ...).
    #[error("Store backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return StoreError::Duplicate(constraint.to_string());
            }
        }
        StoreError::Backend(err.to_string())
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(constraint) => CoreError::Conflict(format!(
                "Duplicate value violates unique constraint: {constraint}"
            )),
            StoreError::Backend(msg) => CoreError::Storage(msg),
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Persistent store of events.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(&self, input: &CreateEvent) -> Result<Event, StoreError>;

    async fn find_event(&self, id: DbId) -> Result<Option<Event>, StoreError>;

    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    async fn search_events(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError>;

    /// Replace all fields. `None` when the event does not exist.
    async fn update_event(&self, id: DbId, input: &CreateEvent)
        -> Result<Option<Event>, StoreError>;

    async fn event_exists(&self, id: DbId) -> Result<bool, StoreError>;

    /// `true` if a row was removed.
    async fn delete_event(&self, id: DbId) -> Result<bool, StoreError>;

    /// Confirm the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Persistent store of registrations.
///
/// Implementations must reject a second registration for the same
/// `(event_id, participant_id)` pair with [`StoreError::Duplicate`],
/// atomically with respect to concurrent inserts.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn create_registration(
        &self,
        input: &CreateRegistration,
    ) -> Result<Registration, StoreError>;

    async fn find_registration(&self, id: DbId) -> Result<Option<Registration>, StoreError>;

    async fn find_by_event_and_participant(
        &self,
        event_id: DbId,
        participant_id: DbId,
    ) -> Result<Option<Registration>, StoreError>;

    async fn list_by_event(&self, event_id: DbId) -> Result<Vec<Registration>, StoreError>;

    async fn list_by_participant(
        &self,
        participant_id: DbId,
    ) -> Result<Vec<Registration>, StoreError>;

    /// `true` if a row was removed.
    async fn delete_registration(&self, id: DbId) -> Result<bool, StoreError>;
}

// ---------------------------------------------------------------------------
// PgStore
// ---------------------------------------------------------------------------

/// PostgreSQL-backed store delegating to the repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgStore {
    async fn create_event(&self, input: &CreateEvent) -> Result<Event, StoreError> {
        Ok(EventRepo::create(&self.pool, input).await?)
    }

    async fn find_event(&self, id: DbId) -> Result<Option<Event>, StoreError> {
        Ok(EventRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(EventRepo::list(&self.pool).await?)
    }

    async fn search_events(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        Ok(EventRepo::search(&self.pool, filter).await?)
    }

    async fn update_event(
        &self,
        id: DbId,
        input: &CreateEvent,
    ) -> Result<Option<Event>, StoreError> {
        Ok(EventRepo::update(&self.pool, id, input).await?)
    }

    async fn event_exists(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(EventRepo::exists(&self.pool, id).await?)
    }

    async fn delete_event(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(EventRepo::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

#[async_trait]
impl RegistrationStore for PgStore {
    async fn create_registration(
        &self,
        input: &CreateRegistration,
    ) -> Result<Registration, StoreError> {
        Ok(RegistrationRepo::create(&self.pool, input).await?)
    }

    async fn find_registration(&self, id: DbId) -> Result<Option<Registration>, StoreError> {
        Ok(RegistrationRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_event_and_participant(
        &self,
        event_id: DbId,
        participant_id: DbId,
    ) -> Result<Option<Registration>, StoreError> {
        Ok(
            RegistrationRepo::find_by_event_and_participant(&self.pool, event_id, participant_id)
                .await?,
        )
    }

    async fn list_by_event(&self, event_id: DbId) -> Result<Vec<Registration>, StoreError> {
        Ok(RegistrationRepo::list_by_event(&self.pool, event_id).await?)
    }

    async fn list_by_participant(
        &self,
        participant_id: DbId,
    ) -> Result<Vec<Registration>, StoreError> {
        Ok(RegistrationRepo::list_by_participant(&self.pool, participant_id).await?)
    }

    async fn delete_registration(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(RegistrationRepo::delete(&self.pool, id).await?)
    }
}

//! Repository for the `registrations` table.

use sqlx::PgPool;
use eventhub_core::types::DbId;

use crate::models::registration::{CreateRegistration, Registration};

/// Column list for `registrations` queries.
const COLUMNS: &str = "id, event_id, participant_id, registered_at, status";

/// Provides CRUD operations for registrations.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Insert a registration, returning the created row.
    ///
    /// A second row for the same `(event_id, participant_id)` pair violates
    /// `uq_registrations_event_participant`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRegistration,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO registrations (event_id, participant_id, registered_at, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(input.event_id)
            .bind(input.participant_id)
            .bind(input.registered_at)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a registration by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registrations WHERE id = $1");
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the registration of a participant to an event, if any.
    pub async fn find_by_event_and_participant(
        pool: &PgPool,
        event_id: DbId,
        participant_id: DbId,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM registrations WHERE event_id = $1 AND participant_id = $2"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(event_id)
            .bind(participant_id)
            .fetch_optional(pool)
            .await
    }

    /// List registrations for an event, oldest first.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM registrations WHERE event_id = $1 ORDER BY registered_at, id"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// List registrations held by a participant, oldest first.
    pub async fn list_by_participant(
        pool: &PgPool,
        participant_id: DbId,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM registrations WHERE participant_id = $1 \
             ORDER BY registered_at, id"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(participant_id)
            .fetch_all(pool)
            .await
    }

    /// Hard-delete a registration. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

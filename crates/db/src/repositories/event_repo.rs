//! Repository for the `events` table.

use sqlx::PgPool;
use eventhub_core::types::DbId;

use crate::models::event::{CreateEvent, Event, EventFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, location, starts_at, ends_at, category, \
                       image_url, programme_url, organizer_id, created_at, updated_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (title, description, location, starts_at, ends_at, \
                                 category, image_url, programme_url, organizer_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(&input.programme_url)
            .bind(input.organizer_id)
            .fetch_one(pool)
            .await
    }

    /// Find an event by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all events ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY id");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// Search events with optional, AND-combined criteria.
    ///
    /// See [`EventFilter::matches`] for the exact semantics.
    pub async fn search(pool: &PgPool, filter: &EventFilter) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE ($1::TEXT IS NULL OR title ILIKE $1 ESCAPE '\\')
               AND ($2::TEXT IS NULL OR location ILIKE $2 ESCAPE '\\')
               AND ($3::TEXT IS NULL OR category ILIKE $3 ESCAPE '\\')
               AND ($4::TIMESTAMPTZ IS NULL OR starts_at >= $4)
               AND ($5::TIMESTAMPTZ IS NULL OR ends_at <= $5)
             ORDER BY id"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(EventFilter::like_pattern(filter.keyword.as_deref()))
            .bind(EventFilter::like_pattern(filter.location.as_deref()))
            .bind(EventFilter::like_pattern(filter.category.as_deref()))
            .bind(filter.starts_after)
            .bind(filter.ends_before)
            .fetch_all(pool)
            .await
    }

    /// Replace every editable field of an event.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = $2,
                description = $3,
                location = $4,
                starts_at = $5,
                ends_at = $6,
                category = $7,
                image_url = $8,
                programme_url = $9,
                organizer_id = $10,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.category)
            .bind(&input.image_url)
            .bind(&input.programme_url)
            .bind(input.organizer_id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether an event row exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete an event. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

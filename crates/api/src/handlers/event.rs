//! Handlers for the `/events` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use eventhub_core::error::CoreError;
use eventhub_core::types::DbId;
use eventhub_core::validation::validate_event_draft;
use eventhub_db::models::event::{CreateEvent, Event, EventFilter};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Event", id })
}

/// POST /api/v1/events
///
/// Persists the event, then announces it to every directory participant.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<DataResponse<Event>>)> {
    let event = state.publication_coordinator.publish(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/events
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = state.events.list_events().await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/search
pub async fn search(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = state.events.search_events(&filter).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Event>>> {
    let event = state
        .events
        .find_event(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: event }))
}

/// PUT /api/v1/events/{id}
///
/// Replaces every field. Does not notify anyone.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateEvent>,
) -> AppResult<Json<DataResponse<Event>>> {
    validate_event_draft(&input.title, input.starts_at, input.ends_at)?;
    let event = state
        .events
        .update_event(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(event_id = id, "Event updated");
    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/events/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if !state.events.event_exists(id).await? {
        return Err(not_found(id));
    }
    if state.events.delete_event(id).await? {
        tracing::info!(event_id = id, "Event deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

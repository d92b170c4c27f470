//! Handlers for the `/registrations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eventhub_core::types::DbId;
use eventhub_db::models::registration::{NewRegistration, Registration};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/registrations
///
/// 409 if the participant is already registered to the event.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<NewRegistration>,
) -> AppResult<(StatusCode, Json<DataResponse<Registration>>)> {
    let registration = state.registration_coordinator.register(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: registration })))
}

/// DELETE /api/v1/registrations/{id}
pub async fn unregister(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.registration_coordinator.unregister(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/registrations/event/{event_id}
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Registration>>>> {
    let registrations = state.registrations.list_by_event(event_id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// GET /api/v1/registrations/participant/{participant_id}
pub async fn list_by_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Registration>>>> {
    let registrations = state.registrations.list_by_participant(participant_id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

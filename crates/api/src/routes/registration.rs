//! Route definitions for the `/registrations` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// POST   /                               -> register
/// DELETE /{id}                           -> unregister
/// GET    /event/{event_id}               -> list_by_event
/// GET    /participant/{participant_id}   -> list_by_participant
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(registration::register))
        .route("/{id}", delete(registration::unregister))
        .route("/event/{event_id}", get(registration::list_by_event))
        .route(
            "/participant/{participant_id}",
            get(registration::list_by_participant),
        )
}

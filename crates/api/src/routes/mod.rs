pub mod event;
pub mod health;
pub mod notification;
pub mod registration;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                                  list, publish
/// /events/search                           filtered list
/// /events/{id}                             get, update, delete
///
/// /registrations                           register
/// /registrations/{id}                      unregister
/// /registrations/event/{event_id}          list by event
/// /registrations/participant/{id}          list by participant
///
/// /notifications/stats                     dispatch counters
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/events", event::router())
        .nest("/registrations", registration::router())
        .nest("/notifications", notification::router())
}

//! Route definitions for the `/events` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::event;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create (publishes and announces)
/// GET    /search    -> search
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list).post(event::create))
        .route("/search", get(event::search))
        .route(
            "/{id}",
            get(event::get_by_id)
                .put(event::update)
                .delete(event::delete),
        )
}

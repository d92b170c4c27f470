use axum::routing::get;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(notification::dispatch_stats))
}

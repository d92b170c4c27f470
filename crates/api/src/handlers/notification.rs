use axum::extract::State;
use axum::Json;
use eventhub_events::DispatchSnapshot;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications/stats
///
/// Delivery outcome counters since process start.
pub async fn dispatch_stats(
    State(state): State<AppState>,
) -> Json<DataResponse<DispatchSnapshot>> {
    Json(DataResponse {
        data: state.dispatcher.stats(),
    })
}

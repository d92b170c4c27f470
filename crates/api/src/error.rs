use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventhub_core::error::CoreError;
use eventhub_db::StoreError;
use serde::Serialize;

/// Message returned in place of any server-side failure detail.
const SANITIZED_MESSAGE: &str = "An internal error occurred";

/// Error returned by HTTP handlers.
///
/// Every failure a handler can hit surfaces as a [`CoreError`], either from
/// a coordinator or from a store lookup. Rendered as
/// `{"error": ..., "code": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Handlers read stores directly for lookups and listings.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Core(err.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    /// Status, machine-readable code, and client-facing message.
    ///
    /// Storage failures are logged here and never leak their details to the
    /// client.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "CONFLICT", msg.clone())
            }
            AppError::Core(CoreError::Storage(detail)) => {
                tracing::error!(error = %detail, "Store failure while handling request");
                sanitized()
            }
        }
    }
}

fn sanitized() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        SANITIZED_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.classify();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

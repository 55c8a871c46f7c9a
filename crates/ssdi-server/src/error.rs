use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ssdi_core::error::TrackerError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(TrackerError::Validation(msg.into()).into())
    }
}

fn status_for(e: &TrackerError) -> StatusCode {
    match e {
        TrackerError::NotInitialized => StatusCode::BAD_REQUEST,
        TrackerError::NotFoundOrForbidden(_)
        | TrackerError::UserNotFound(_)
        | TrackerError::SectionNotFound(_)
        | TrackerError::DocumentNotFound(_)
        | TrackerError::TrackingNotFound(_)
        | TrackerError::ContactNotFound(_) => StatusCode::NOT_FOUND,
        TrackerError::Validation(_)
        | TrackerError::InvalidDocumentStatus(_)
        | TrackerError::InvalidDocumentCategory(_)
        | TrackerError::InvalidSectionStatus(_)
        | TrackerError::InvalidCommunicationType(_)
        | TrackerError::InvalidSource(_)
        | TrackerError::InvalidPriority(_) => StatusCode::BAD_REQUEST,
        TrackerError::StoreUnavailable(_)
        | TrackerError::Io(_)
        | TrackerError::Yaml(_)
        | TrackerError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<TrackerError>() {
            Some(e) => status_for(e),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use podtrack_core::PodtrackError;

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<PodtrackError>() {
            match e {
                PodtrackError::PodNotFound(_) | PodtrackError::NoRecord { .. } => {
                    StatusCode::NOT_FOUND
                }
                PodtrackError::MalformedFieldName(_) => StatusCode::BAD_REQUEST,
                // Record-store collaborator failures: the request aborts as
                // a whole, never a partial response.
                PodtrackError::SchemaUnavailable { .. }
                | PodtrackError::QueryFailed(_)
                | PodtrackError::UpdateRejected { .. }
                | PodtrackError::MissingRecordId => StatusCode::BAD_GATEWAY,
                PodtrackError::Io(_) | PodtrackError::Yaml(_) | PodtrackError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

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

//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use irhub_domain::error::IrHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`IrHubError`] to an HTTP response with appropriate status code.
pub struct ApiError(IrHubError);

impl From<IrHubError> for ApiError {
    fn from(err: IrHubError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            IrHubError::Validation(_) | IrHubError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            IrHubError::NotFound(_) => StatusCode::NOT_FOUND,
            IrHubError::UnknownCommand(_) => StatusCode::UNPROCESSABLE_ENTITY,
            IrHubError::CommandFailed(_) => StatusCode::BAD_GATEWAY,
            IrHubError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            IrHubError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            IrHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                "internal server error".to_string()
            }
            IrHubError::CommandFailed(err) => {
                tracing::warn!(error = %err, "command failed");
                err.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

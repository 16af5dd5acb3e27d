//! HTTP error boundary
//!
//! Handlers return `Result<_, ApiError>`; [`ApiError::into_reply`] is the only
//! place where failures become status codes and JSON bodies.

use thiserror::Error;
use warp::http::StatusCode;

use crate::models::ErrorBody;
use crate::storage::StoreError;
use crate::validation::ValidationError;

/// Errors surfaced by the guestbook HTTP API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client input rejected by validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request body was not JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Storage failed while inserting a message
    #[error("Failed to save message: {0}")]
    SaveFailed(#[source] StoreError),

    /// Storage failed while searching
    #[error("Failed to search messages: {0}")]
    SearchFailed(#[source] StoreError),

    /// Anything else that reached the top level
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::SaveFailed(_) | ApiError::SearchFailed(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing body. Server failures never include the underlying cause.
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(err) => ErrorBody::new(err.error(), err.details()),
            ApiError::InvalidBody(_) => ErrorBody::new(
                "Invalid request body",
                "Request body must be a JSON object",
            ),
            ApiError::SaveFailed(_) => ErrorBody::new(
                "Failed to save message",
                "Database error occurred while saving your message",
            ),
            ApiError::SearchFailed(_) => ErrorBody::new(
                "Failed to search messages",
                "Database error occurred while searching",
            ),
            ApiError::Internal(_) => internal_error_body(),
        }
    }

    /// Log server-side failures and convert into a JSON reply
    pub fn into_reply(self) -> warp::reply::WithStatus<warp::reply::Json> {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        warp::reply::with_status(warp::reply::json(&self.body()), status)
    }
}

pub(crate) fn internal_error_body() -> ErrorBody {
    ErrorBody::new("Internal server error", "An unexpected error occurred")
}

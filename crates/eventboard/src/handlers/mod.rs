pub mod admin;
pub mod digest;
pub mod events;
pub mod health;
pub mod submit;
pub mod subscribers;

use axum::http::StatusCode;
use eventboard_core::storage::{repository_error_to_status_code, RepositoryError};

/// Error response with message (for validation and lookup errors).
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, String) {
    let msg = message.into();
    tracing::warn!(status = %status, message = %msg, "API error");
    (status, msg)
}

/// Maps a repository error to its HTTP response.
pub(crate) fn repo_error(err: RepositoryError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(repository_error_to_status_code(&err))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, err.to_string())
}

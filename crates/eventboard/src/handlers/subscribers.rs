//! Digest subscription handler.

use axum::{extract::State, http::StatusCode, Json};

use eventboard_core::events::{Subscriber, SubscribeRequest};
use eventboard_core::storage::RepositoryError;

use crate::handlers::{error_response, repo_error};
use crate::state::AppState;

/// Subscribe an email to the weekly digest (POST /api/subscribers).
///
/// Subscribing an address that is already on the list succeeds silently.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if !req.email.contains('@') {
        return Err(error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please enter a valid email address",
        ));
    }

    let subscriber = Subscriber::new(req.email);
    match state.subscriber_repo.create_subscriber(&subscriber).await {
        Ok(()) => {
            tracing::info!(subscriber_id = %subscriber.id, "New digest subscriber");
        }
        Err(RepositoryError::AlreadyExists { .. }) => {
            tracing::debug!(email = %subscriber.email, "Already subscribed");
        }
        Err(e) => return Err(repo_error(e)),
    }

    Ok(Json(serde_json::json!({ "success": true })))
}

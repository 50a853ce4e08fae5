//! Event submission handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use eventboard_core::events::{validate_submission, Event, Occurrence, SubmitEventRequest};

use crate::handlers::{error_response, repo_error};
use crate::state::AppState;

/// Submit a new event (POST /api/events).
///
/// Valid submissions are stored unapproved and stay off the listings until
/// an admin approves them. One-off events get their single occurrence row
/// immediately; recurring events are expanded at approval time.
pub async fn submit_event(
    State(state): State<AppState>,
    Json(req): Json<SubmitEventRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    validate_submission(&req, state.config.today())
        .map_err(|e| error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let event: Event = req.into_event();
    state
        .event_repo
        .create_event(&event)
        .await
        .map_err(repo_error)?;

    if let Some(date) = event.date {
        let occurrence = Occurrence::new(event.id, date, event.start_time, event.end_time);
        state
            .occurrence_repo
            .create_occurrence(&occurrence)
            .await
            .map_err(repo_error)?;
    }

    tracing::info!(event_id = %event.id, slug = %event.slug, "Event submitted");
    Ok((StatusCode::CREATED, Json(event)))
}

//! Health check endpoints.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Storage probe (counts events through the repository)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting
/// connections without touching storage.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Storage health probe.
///
/// Runs a trivial query against the event repository. Returns 200 with the
/// event count when storage responds, 503 otherwise.
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.event_repo.count_events().await {
        Ok(count) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "events": count })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "unavailable", "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

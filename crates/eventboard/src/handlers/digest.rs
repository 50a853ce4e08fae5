//! Weekly digest trigger.
//!
//! Meant to be hit by a cron job. Composition (grouping, labels, subject)
//! is pure core logic; this handler renders the askama template and pushes
//! batches through the configured mailer.

use askama::Template;
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};

use eventboard_core::events::{build_digest_days, digest_subject, DigestDay};
use eventboard_core::storage::DateRange;

use crate::handlers::{error_response, repo_error};
use crate::state::AppState;

/// Recipients per outbound mail request.
const BATCH_SIZE: usize = 50;

/// The digest email, rendered from the grouped days.
#[derive(Template)]
#[template(path = "digest_email.html")]
struct DigestEmailTemplate<'a> {
    days: &'a [DigestDay],
    base_url: &'a str,
}

/// Send the weekly digest to all subscribers (POST /api/digest).
///
/// When `CRON_SECRET` is configured, the request must carry it (or the
/// admin password, for manual triggers) as a bearer token.
pub async fn send_digest(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if let Some(secret) = &state.config.cron_secret {
        let authorized = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == secret || token == state.config.admin_password);
        if !authorized {
            return Err(error_response(StatusCode::UNAUTHORIZED, "Unauthorized"));
        }
    }

    let subscribers = state
        .subscriber_repo
        .list_subscribers()
        .await
        .map_err(repo_error)?;
    if subscribers.is_empty() {
        return Ok(Json(serde_json::json!({ "message": "No subscribers" })));
    }

    // Today through the next 7 days, same window the original digest used.
    let range = DateRange::spanning_days(state.config.today(), 7);
    let instances = state
        .occurrence_repo
        .instances_in_range(range)
        .await
        .map_err(repo_error)?;
    if instances.is_empty() {
        return Ok(Json(serde_json::json!({ "message": "No events this week" })));
    }

    let days = build_digest_days(&instances);
    let html = DigestEmailTemplate {
        days: &days,
        base_url: &state.config.public_base_url,
    }
    .render()
    .map_err(|e| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {e}"),
        )
    })?;
    let subject = digest_subject(instances.len());

    let emails: Vec<String> = subscribers.into_iter().map(|s| s.email).collect();
    let mut sent = 0;
    for batch in emails.chunks(BATCH_SIZE) {
        state
            .mailer
            .send(batch, &subject, &html)
            .await
            .map_err(|e| error_response(StatusCode::BAD_GATEWAY, e.to_string()))?;
        sent += batch.len();
    }

    tracing::info!(subscribers = sent, events = instances.len(), "Digest sent");
    Ok(Json(serde_json::json!({
        "message": format!("Digest sent to {} subscribers with {} events", sent, instances.len())
    })))
}

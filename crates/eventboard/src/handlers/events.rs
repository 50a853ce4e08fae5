//! Public listing handlers.
//!
//! Every listing only surfaces approved events and non-cancelled
//! occurrences; the repositories enforce that in their projection queries.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use eventboard_core::events::{is_happening_at, Event, EventInstance, Occurrence};
use eventboard_core::storage::DateRange;

use crate::handlers::{error_response, repo_error};
use crate::state::AppState;

/// Maximum results returned by the search endpoint.
const SEARCH_LIMIT: usize = 20;

/// Upcoming occurrences shown on an event detail page.
const DETAIL_OCCURRENCE_LIMIT: usize = 10;

/// List today's events, ordered by start time (GET /api/events/today).
pub async fn today(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventInstance>>, (StatusCode, String)> {
    let today = state.config.today();
    let instances = state
        .occurrence_repo
        .instances_in_range(DateRange::single_day(today))
        .await
        .map_err(repo_error)?;

    Ok(Json(instances))
}

/// List events happening right now (GET /api/events/now).
///
/// An occurrence with no end time is treated as running until midnight.
pub async fn happening_now(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventInstance>>, (StatusCode, String)> {
    let today = state.config.today();
    let now = state.config.now_time();

    let instances = state
        .occurrence_repo
        .instances_in_range(DateRange::single_day(today))
        .await
        .map_err(repo_error)?;

    let happening: Vec<EventInstance> = instances
        .into_iter()
        .filter(|i| is_happening_at(i.start_time, i.end_time, now))
        .collect();

    Ok(Json(happening))
}

/// List events for the next 7 days, excluding today (GET /api/events/week).
pub async fn this_week(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventInstance>>, (StatusCode, String)> {
    let today = state.config.today();
    let tomorrow = today + chrono::Duration::days(1);

    let instances = state
        .occurrence_repo
        .instances_in_range(DateRange::spanning_days(tomorrow, 6))
        .await
        .map_err(repo_error)?;

    Ok(Json(instances))
}

/// Query parameters for event search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Search upcoming events (GET /api/events/search?q=).
///
/// Queries shorter than 2 characters return an empty list, matching the
/// minimum the submission form enforces client-side.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<EventInstance>>, (StatusCode, String)> {
    let q = query.q.trim();
    if q.len() < 2 {
        return Ok(Json(Vec::new()));
    }

    let instances = state
        .occurrence_repo
        .search_instances(q, state.config.today(), SEARCH_LIMIT)
        .await
        .map_err(repo_error)?;

    Ok(Json(instances))
}

/// An approved event plus its upcoming occurrences.
#[derive(Debug, Serialize)]
pub struct EventDetail {
    pub event: Event,
    pub upcoming: Vec<Occurrence>,
}

/// Get a single approved event by slug (GET /api/events/{slug}).
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventDetail>, (StatusCode, String)> {
    let event = state
        .event_repo
        .get_event_by_slug(&slug)
        .await
        .map_err(repo_error)?
        .filter(|e| e.is_approved)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, format!("Event not found: {slug}")))?;

    let upcoming = state
        .occurrence_repo
        .upcoming_for_event(event.id, state.config.today(), DETAIL_OCCURRENCE_LIMIT)
        .await
        .map_err(repo_error)?;

    Ok(Json(EventDetail { event, upcoming }))
}

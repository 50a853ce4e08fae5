//! Admin moderation handlers.
//!
//! Authentication follows the original single-moderator model: one static
//! password, exchanged for an HttpOnly session cookie. Admin endpoints also
//! accept the password as a bearer token so the CLI can drive moderation
//! without a cookie jar.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use eventboard_core::events::{expand_recurrence, Event, Occurrence, UpdateEventRequest};

use crate::handlers::{error_response, repo_error};
use crate::state::AppState;

/// Name of the admin session cookie.
pub const ADMIN_COOKIE: &str = "eventboard_admin";

const COOKIE_VALUE: &str = "authenticated";

/// Extracts a bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Checks that the request carries admin credentials.
fn require_admin(
    state: &AppState,
    jar: &CookieJar,
    headers: &HeaderMap,
) -> Result<(), (StatusCode, String)> {
    let cookie_ok = jar
        .get(ADMIN_COOKIE)
        .is_some_and(|c| c.value() == COOKIE_VALUE);
    let bearer_ok = bearer_token(headers).is_some_and(|t| t == state.config.admin_password);

    if cookie_ok || bearer_ok {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Admin authentication required",
        ))
    }
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Exchange the admin password for a session cookie (POST /api/admin/login).
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, StatusCode), (StatusCode, String)> {
    if req.password != state.config.admin_password {
        return Err(error_response(StatusCode::UNAUTHORIZED, "Invalid password"));
    }

    let cookie = Cookie::build((ADMIN_COOKIE, COOKIE_VALUE))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(24))
        .build();

    tracing::info!("Admin logged in");
    Ok((jar.add(cookie), StatusCode::NO_CONTENT))
}

/// Clear the admin session cookie (POST /api/admin/logout).
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut removal = Cookie::from(ADMIN_COOKIE);
    removal.set_path("/");
    (jar.remove(removal), StatusCode::NO_CONTENT)
}

/// List unapproved events, oldest first (GET /api/admin/events/pending).
pub async fn list_pending(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Json<Vec<Event>>, (StatusCode, String)> {
    require_admin(&state, &jar, &headers)?;

    let pending = state.event_repo.list_pending().await.map_err(repo_error)?;
    Ok(Json(pending))
}

async fn get_event_or_404(state: &AppState, id: Uuid) -> Result<Event, (StatusCode, String)> {
    state
        .event_repo
        .get_event(id)
        .await
        .map_err(repo_error)?
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, format!("Event not found: {id}")))
}

/// Approve an event (POST /api/admin/events/{id}/approve).
///
/// Recurring events are expanded here: the pattern is walked from today in
/// the configured timezone through its end date and the resulting
/// occurrences are bulk-inserted.
pub async fn approve_event(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, (StatusCode, String)> {
    require_admin(&state, &jar, &headers)?;

    let mut event = get_event_or_404(&state, id).await?;
    event.is_approved = true;
    event.updated_at = Some(Utc::now());
    state
        .event_repo
        .update_event(&event)
        .await
        .map_err(repo_error)?;

    if let Some(pattern) = &event.recurrence {
        let occurrences = expand_recurrence(
            event.id,
            pattern,
            event.start_time,
            event.end_time,
            Some(state.config.today()),
        );
        let count = occurrences.len();
        if !occurrences.is_empty() {
            state
                .occurrence_repo
                .create_occurrences(&occurrences)
                .await
                .map_err(repo_error)?;
        }
        tracing::info!(event_id = %event.id, occurrences = count, "Approved recurring event");
    } else {
        tracing::info!(event_id = %event.id, "Approved event");
    }

    Ok(Json(event))
}

/// Reject an event, deleting it and its occurrences
/// (DELETE /api/admin/events/{id}).
pub async fn reject_event(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    require_admin(&state, &jar, &headers)?;

    // FK cascade would cover this on SQLite, but be explicit for all backends.
    state
        .occurrence_repo
        .delete_occurrences_for_event(id)
        .await
        .map_err(repo_error)?;
    state
        .event_repo
        .delete_event(id)
        .await
        .map_err(repo_error)?;

    tracing::info!(event_id = %id, "Rejected event");
    Ok(StatusCode::NO_CONTENT)
}

/// Partially update an event's listing fields (PATCH /api/admin/events/{id}).
pub async fn update_event(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<Event>, (StatusCode, String)> {
    require_admin(&state, &jar, &headers)?;

    let mut event = get_event_or_404(&state, id).await?;
    req.apply_to(&mut event);
    state
        .event_repo
        .update_event(&event)
        .await
        .map_err(repo_error)?;

    Ok(Json(event))
}

/// Toggle the featured flag (POST /api/admin/events/{id}/feature).
pub async fn toggle_featured(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, (StatusCode, String)> {
    require_admin(&state, &jar, &headers)?;

    let mut event = get_event_or_404(&state, id).await?;
    event.is_featured = !event.is_featured;
    event.updated_at = Some(Utc::now());
    state
        .event_repo
        .update_event(&event)
        .await
        .map_err(repo_error)?;

    Ok(Json(event))
}

/// Cancel a single occurrence (POST /api/admin/occurrences/{id}/cancel).
pub async fn cancel_occurrence(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Occurrence>, (StatusCode, String)> {
    require_admin(&state, &jar, &headers)?;

    let mut occurrence = state
        .occurrence_repo
        .get_occurrence(id)
        .await
        .map_err(repo_error)?
        .ok_or_else(|| {
            error_response(StatusCode::NOT_FOUND, format!("Occurrence not found: {id}"))
        })?;

    occurrence.is_cancelled = true;
    state
        .occurrence_repo
        .update_occurrence(&occurrence)
        .await
        .map_err(repo_error)?;

    tracing::info!(occurrence_id = %id, "Cancelled occurrence");
    Ok(Json(occurrence))
}

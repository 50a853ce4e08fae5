use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        admin::{
            approve_event, cancel_occurrence, list_pending, login, logout, reject_event,
            toggle_featured, update_event,
        },
        digest::send_digest,
        events::{get_by_slug, happening_now, search, this_week, today},
        health::{healthz, livez},
        submit::submit_event,
        subscribers::subscribe,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // API routes with CORS
    let api_routes = Router::new()
        // Public listing and submission routes
        .route("/events", post(submit_event))
        .route("/events/today", get(today))
        .route("/events/now", get(happening_now))
        .route("/events/week", get(this_week))
        .route("/events/search", get(search))
        .route("/events/{slug}", get(get_by_slug))
        .route("/subscribers", post(subscribe))
        // Digest trigger (cron)
        .route("/digest", post(send_digest))
        // Admin moderation routes
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/events/pending", get(list_pending))
        .route(
            "/admin/events/{id}",
            patch(update_event).delete(reject_event),
        )
        .route("/admin/events/{id}/approve", post(approve_event))
        .route("/admin/events/{id}/feature", post(toggle_featured))
        .route("/admin/occurrences/{id}/cancel", post(cancel_occurrence))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

//! Public event API operations.

use serde::Deserialize;

use eventboard_core::events::{Event, EventInstance, Occurrence, SubmitEventRequest};

use super::EventboardClient;
use crate::error::Result;

/// An event with its upcoming occurrences, as returned by the detail endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDetail {
    pub event: Event,
    pub upcoming: Vec<Occurrence>,
}

impl EventboardClient {
    /// Today's events.
    pub async fn events_today(&self) -> Result<Vec<EventInstance>> {
        let response = self
            .client
            .get(self.url("/api/events/today"))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Events happening right now.
    pub async fn events_now(&self) -> Result<Vec<EventInstance>> {
        let response = self.client.get(self.url("/api/events/now")).send().await?;
        self.handle_response(response).await
    }

    /// Events for the next 7 days.
    pub async fn events_week(&self) -> Result<Vec<EventInstance>> {
        let response = self.client.get(self.url("/api/events/week")).send().await?;
        self.handle_response(response).await
    }

    /// Search upcoming events.
    pub async fn search_events(&self, query: &str) -> Result<Vec<EventInstance>> {
        let response = self
            .client
            .get(self.url("/api/events/search"))
            .query(&[("q", query)])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get one event by slug, with its upcoming occurrences.
    pub async fn get_event(&self, slug: &str) -> Result<EventDetail> {
        let response = self
            .client
            .get(self.url(&format!("/api/events/{slug}")))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Submit a new event for moderation.
    pub async fn submit_event(&self, req: &SubmitEventRequest) -> Result<Event> {
        let response = self
            .client
            .post(self.url("/api/events"))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Subscribe an email to the weekly digest.
    pub async fn subscribe(&self, email: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/api/subscribers"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}

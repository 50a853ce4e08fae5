//! Admin API operations.
//!
//! Every call sends the admin password as a bearer token.

use serde::Deserialize;
use uuid::Uuid;

use eventboard_core::events::{Event, Occurrence};

use super::EventboardClient;
use crate::error::Result;

/// Response from the digest trigger.
#[derive(Debug, Clone, Deserialize)]
pub struct DigestResponse {
    pub message: String,
}

impl EventboardClient {
    /// List events waiting for approval.
    pub async fn pending_events(&self, password: &str) -> Result<Vec<Event>> {
        let response = self
            .client
            .get(self.url("/api/admin/events/pending"))
            .bearer_auth(password)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Approve an event.
    pub async fn approve_event(&self, password: &str, id: Uuid) -> Result<Event> {
        let response = self
            .client
            .post(self.url(&format!("/api/admin/events/{id}/approve")))
            .bearer_auth(password)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Reject an event, deleting it and its occurrences.
    pub async fn reject_event(&self, password: &str, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/admin/events/{id}")))
            .bearer_auth(password)
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Toggle an event's featured flag.
    pub async fn toggle_featured(&self, password: &str, id: Uuid) -> Result<Event> {
        let response = self
            .client
            .post(self.url(&format!("/api/admin/events/{id}/feature")))
            .bearer_auth(password)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Cancel a single occurrence.
    pub async fn cancel_occurrence(&self, password: &str, id: Uuid) -> Result<Occurrence> {
        let response = self
            .client
            .post(self.url(&format!("/api/admin/occurrences/{id}/cancel")))
            .bearer_auth(password)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Trigger the weekly digest send.
    pub async fn send_digest(&self, password: &str) -> Result<DigestResponse> {
        let response = self
            .client
            .post(self.url("/api/digest"))
            .bearer_auth(password)
            .send()
            .await?;
        self.handle_response(response).await
    }
}

//! Health check API operations.

use serde::Deserialize;

use super::EventboardClient;
use crate::error::Result;

/// Response from the storage health probe.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub events: u64,
}

impl EventboardClient {
    /// Check the storage health probe.
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.client.get(self.url("/healthz")).send().await?;
        self.handle_response(response).await
    }
}

//! Outbound email delivery for the weekly digest.
//!
//! The digest handler composes the email and hands it to a [`Mailer`].
//! With a configured API key, mail goes out through the Resend HTTP API;
//! without one, deliveries are logged and dropped so dev environments and
//! tests never send anything.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;

/// Errors that can occur when sending mail.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Mail request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Mail provider rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Sends an HTML email to a batch of recipients.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &[String], subject: &str, html: &str) -> Result<(), MailerError>;
}

/// Picks the mailer implementation for the given configuration.
pub fn from_config(config: &Config) -> Arc<dyn Mailer> {
    match &config.resend_api_key {
        Some(api_key) => Arc::new(ResendMailer::new(api_key, &config.digest_from)),
        None => {
            tracing::info!("RESEND_API_KEY not set, digest emails will be logged only");
            Arc::new(LogMailer)
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

/// Mailer backed by the Resend HTTP API.
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
    endpoint: String,
}

impl ResendMailer {
    /// Creates a mailer for the given API key and From header.
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            from: from.into(),
            endpoint: "https://api.resend.com/emails".to_string(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, to: &[String], subject: &str, html: &str) -> Result<(), MailerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to,
                subject,
                html,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(recipients = to.len(), subject = %subject, "Sent digest batch");
        Ok(())
    }
}

/// Mailer that logs instead of sending. Used in dev and tests.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &[String], subject: &str, html: &str) -> Result<(), MailerError> {
        tracing::info!(
            recipients = to.len(),
            subject = %subject,
            bytes = html.len(),
            "Digest email (not sent, no mail provider configured)"
        );
        Ok(())
    }
}

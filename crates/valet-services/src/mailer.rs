//! Transactional email delivery through the Brevo HTTP API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, instrument};
use valet_core::config::MailConfig;
use valet_core::{AppError, AppResult};

/// A file attached to an outgoing email.
///
/// Content is raw bytes; base64 encoding happens at send time because that
/// is a Brevo wire detail, not ours.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub name: String,
    pub content: Vec<u8>,
}

impl EmailAttachment {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

#[derive(Serialize)]
struct EmailSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct EmailRecipient<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct AttachmentPayload {
    name: String,
    /// Base64-encoded file content
    content: String,
}

/// Request body for Brevo's v3 transactional email endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailPayload<'a> {
    sender: EmailSender<'a>,
    to: Vec<EmailRecipient<'a>>,
    subject: &'a str,
    html_content: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachment: Vec<AttachmentPayload>,
}

/// Brevo transactional email client.
///
/// When no API key is configured the client is a no-op: `send` logs and
/// returns `Ok(())` so local environments work without credentials.
#[derive(Clone)]
pub struct Mailer {
    http_client: Client,
    config: MailConfig,
}

impl Mailer {
    /// Create a new mailer from configuration.
    pub fn new(config: MailConfig) -> AppResult<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build mail HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Whether an API key is configured and emails will actually go out.
    pub fn enabled(&self) -> bool {
        self.config.enabled()
    }

    /// Send one HTML email, optionally with attachments.
    #[instrument(skip(self, html_content, attachments))]
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        html_content: &str,
        attachments: &[EmailAttachment],
    ) -> AppResult<()> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            debug!("Mail delivery disabled, skipping email to {}", to);
            return Ok(());
        };

        let payload = EmailPayload {
            sender: EmailSender {
                name: &self.config.sender_name,
                email: &self.config.sender_email,
            },
            to: vec![EmailRecipient { email: to }],
            subject,
            html_content,
            attachment: attachments
                .iter()
                .map(|a| AttachmentPayload {
                    name: a.name.clone(),
                    content: STANDARD.encode(&a.content),
                })
                .collect(),
        };

        let response = self
            .http_client
            .post(&self.config.api_url)
            .header("api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send email request: {}", e);
                AppError::EmailDelivery(format!("Failed to send email request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|_| "(no body)".to_string());
            error!("Brevo API error: {} - {}", status, text);
            return Err(AppError::EmailDelivery(format!(
                "Brevo API error: {} - {}",
                status, text
            )));
        }

        debug!("Email sent to {}", to);
        Ok(())
    }
}

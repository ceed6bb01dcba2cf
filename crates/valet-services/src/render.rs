//! HTTP client for the PDF render service.
//!
//! The render service receives a JSON document payload and returns the laid
//! out PDF as raw bytes. Layout lives there; this side owns only the data.

use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, instrument};
use valet_core::config::RenderConfig;
use valet_core::{AppError, AppResult};

/// Client for the document render service.
#[derive(Clone)]
pub struct RenderClient {
    http_client: Client,
    url: String,
}

impl RenderClient {
    /// Create a new render client from configuration.
    pub fn new(config: &RenderConfig) -> AppResult<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build render HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url: config.url.clone(),
        })
    }

    /// Render a document payload into PDF bytes.
    #[instrument(skip(self, document))]
    pub async fn render<T: Serialize + ?Sized>(&self, document: &T) -> AppResult<Vec<u8>> {
        let response = self
            .http_client
            .post(&self.url)
            .json(document)
            .send()
            .await
            .map_err(|e| {
                error!("Render request failed: {}", e);
                AppError::RenderFailed(format!("render request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Render service returned {}", status);
            return Err(AppError::RenderFailed(format!(
                "render service returned {}",
                status
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!("Failed to read rendered document: {}", e);
            AppError::RenderFailed(format!("failed to read rendered document: {}", e))
        })?;

        debug!("Rendered document: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_from_default_config() {
        let client = RenderClient::new(&RenderConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_service_maps_to_render_error() {
        let config = RenderConfig {
            url: "http://127.0.0.1:1/render".to_string(),
            timeout_secs: 1,
        };
        let client = RenderClient::new(&config).unwrap();

        let result = client.render(&serde_json::json!({"titulo": "Recibo"})).await;
        match result {
            Err(AppError::RenderFailed(_)) => {}
            other => panic!("expected RenderFailed, got {:?}", other.map(|b| b.len())),
        }
    }
}

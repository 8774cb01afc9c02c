use cleope_core::error::{CleopeError, Result};
use std::time::Duration;
use tracing::debug;

use crate::ports::CatalogueClient;

/// HTTP catalogue client backed by reqwest
pub struct OndaClient {
    /// HTTP client
    client: reqwest::Client,

    /// Runtime driving the requests
    runtime: tokio::runtime::Runtime,
}

impl OndaClient {
    /// Create a client with the default 60 second timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(60))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            CleopeError::Catalogue { reason: format!("Failed to build HTTP client: {}", e) }
        })?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CleopeError::Catalogue {
                reason: format!("Failed to create async runtime: {}", e),
            })?;

        Ok(Self { client, runtime })
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| CleopeError::Catalogue {
            reason: format!("Failed to reach the catalogue: {}", e),
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CleopeError::Catalogue {
                reason: format!("Catalogue API error ({}): {}", status, error_text.trim()),
            });
        }

        response.text().await.map_err(|e| CleopeError::Catalogue {
            reason: format!("Failed to read catalogue response: {}", e),
        })
    }
}

impl CatalogueClient for OndaClient {
    fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let body = self.runtime.block_on(self.fetch(url))?;
        if body.trim().is_empty() {
            return Err(CleopeError::MalformedResponse {
                reason: "empty response body".to_string(),
            });
        }
        serde_json::from_str(&body).map_err(|e| CleopeError::MalformedResponse {
            reason: format!("response is not JSON: {}", e),
        })
    }

    fn get_text(&self, url: &str) -> Result<String> {
        self.runtime.block_on(self.fetch(url))
    }
}

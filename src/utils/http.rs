//! HTTP client utilities.

use reqwest::{Client, RequestBuilder};
use std::sync::Arc;

use crate::sources::SourceError;

/// Shared HTTP client
///
/// No timeouts or retries are configured; a failed request surfaces as is.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with a custom user agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Start a GET request
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    /// GET `url` and return the body, failing on any non-success status
    pub async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api(format!("{} returned status: {}", url, status)));
        }

        Ok(response.text().await?)
    }
}

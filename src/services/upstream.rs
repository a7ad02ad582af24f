use crate::models::OutboundRequest;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that prevent a response from the upstream function
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

/// Raw reply from the upstream function, read once as text
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// Client for the external match-generation function
///
/// Every call is a single POST to a fixed URL. There are no retries.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    function_url: String,
    client: Client,
}

impl UpstreamClient {
    /// Create a new upstream client
    pub fn new(function_url: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            function_url,
            client,
        })
    }

    pub fn function_url(&self) -> &str {
        &self.function_url
    }

    /// Send the relayed request and read the body as text
    ///
    /// A failure while reading the body counts as a transport failure, the
    /// same as a refused connection.
    pub async fn send(&self, outbound: OutboundRequest) -> Result<UpstreamResponse, UpstreamError> {
        let mut request = self
            .client
            .post(&self.function_url)
            .header(CONTENT_TYPE, "application/json")
            .body(outbound.body);

        if let Some(authorization) = outbound.authorization {
            request = request.header(AUTHORIZATION, authorization);
        }
        if let Some(api_key) = outbound.api_key {
            request = request.header("apikey", api_key);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!("Upstream responded with {} ({} bytes)", status, body.len());

        Ok(UpstreamResponse { status, body })
    }
}

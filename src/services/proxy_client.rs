use crate::services::session::Session;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Raw reply from the edge proxy
#[derive(Debug, Clone)]
pub struct ProxyReply {
    pub status: u16,
    pub body: String,
}

impl ProxyReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Dashboard-side HTTP client for the generate-matches endpoint
#[derive(Debug, Clone)]
pub struct ProxyClient {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl ProxyClient {
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            api_key,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the proxy for fresh matches on behalf of `session`
    ///
    /// Each call carries a unique `t` marker so intermediary caches never
    /// serve a previous generation.
    pub async fn request_matches(&self, session: &Session) -> Result<ProxyReply, reqwest::Error> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&[("t", cache_buster())])
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&session.access_token);

        if let Some(api_key) = &self.api_key {
            request = request.header("apikey", api_key);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ProxyReply { status, body })
    }
}

fn cache_buster() -> String {
    format!(
        "{}-{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_buster_is_unique_per_call() {
        assert_ne!(cache_buster(), cache_buster());
    }

    #[test]
    fn test_reply_success_range() {
        let reply = |status| ProxyReply { status, body: String::new() };
        assert!(reply(200).is_success());
        assert!(reply(201).is_success());
        assert!(!reply(304).is_success());
        assert!(!reply(500).is_success());
    }
}

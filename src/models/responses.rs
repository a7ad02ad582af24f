use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::core::cors::CorsHeaders;
use crate::models::domain::Match;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const UPSTREAM_UNREACHABLE: &str = "Failed to reach upstream function";

/// Body returned by the upstream function on success
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateMatchesResponse {
    /// Missing or null means no matches yet
    #[serde(default)]
    pub matches: Option<Vec<Match>>,
}

impl GenerateMatchesResponse {
    pub fn into_matches(self) -> Vec<Match> {
        self.matches.unwrap_or_default()
    }
}

/// Error body shared by the proxy and the upstream function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// What the edge proxy hands back for every inbound request
///
/// `body` is `None` only for preflight, which answers with an empty body.
#[derive(Debug, Clone)]
pub struct NormalizedResponse {
    pub status: u16,
    pub cors: CorsHeaders,
    pub body: Option<Value>,
}

impl NormalizedResponse {
    pub fn preflight(cors: CorsHeaders) -> Self {
        Self { status: 200, cors, body: None }
    }

    pub fn json(status: u16, cors: CorsHeaders, body: Value) -> Self {
        Self { status, cors, body: Some(body) }
    }

    pub fn error(status: u16, cors: CorsHeaders, message: &str) -> Self {
        Self::json(status, cors, serde_json::json!({ "error": message }))
    }

    pub fn method_not_allowed(cors: CorsHeaders) -> Self {
        Self::error(405, cors, METHOD_NOT_ALLOWED)
    }

    pub fn upstream_unreachable(cors: CorsHeaders) -> Self {
        Self::error(502, cors, UPSTREAM_UNREACHABLE)
    }
}

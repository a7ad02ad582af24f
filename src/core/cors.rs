//! Origin resolution for the edge proxy.
//!
//! Unknown origins are not rejected here. They receive the first allow-list
//! entry, which a browser will refuse to match, so cross-origin reads from
//! them fail on the client while same-origin and server-to-server callers
//! still get a well-formed response.

pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Fixed origin allow-list, injected from configuration at startup
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    /// Returns `None` for an empty allow-list; there would be no fallback origin.
    pub fn new(allowed_origins: Vec<String>) -> Option<Self> {
        if allowed_origins.is_empty() {
            return None;
        }
        Some(Self { allowed_origins })
    }

    pub fn default_origin(&self) -> &str {
        &self.allowed_origins[0]
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }

    /// Echo an allowed origin, otherwise fall back to the first entry
    pub fn resolve_origin(&self, origin: Option<&str>) -> &str {
        origin
            .and_then(|origin| self.allowed_origins.iter().find(|o| o.as_str() == origin))
            .map(String::as_str)
            .unwrap_or_else(|| self.default_origin())
    }

    pub fn headers_for(&self, origin: Option<&str>) -> CorsHeaders {
        CorsHeaders {
            allow_origin: self.resolve_origin(origin).to_string(),
        }
    }
}

/// CORS headers attached to every proxy response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    pub allow_origin: String,
}

impl CorsHeaders {
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("Access-Control-Allow-Origin", self.allow_origin.as_str()),
            ("Access-Control-Allow-Methods", ALLOW_METHODS),
            ("Access-Control-Allow-Headers", ALLOW_HEADERS),
            ("Vary", "Origin"),
        ]
    }
}

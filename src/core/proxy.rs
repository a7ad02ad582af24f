use actix_web::http::Method;
use serde_json::{json, Value};
use crate::core::cors::CorsPolicy;
use crate::models::{InboundRequest, NormalizedResponse, OutboundRequest};
use crate::services::UpstreamClient;

/// Stateless relay between the dashboard and the upstream function
///
/// Every inbound request produces a well-formed status and JSON body; no
/// failure path escapes as an error.
#[derive(Debug, Clone)]
pub struct EdgeProxy {
    cors: CorsPolicy,
    upstream: UpstreamClient,
}

impl EdgeProxy {
    pub fn new(cors: CorsPolicy, upstream: UpstreamClient) -> Self {
        Self { cors, upstream }
    }

    pub fn cors(&self) -> &CorsPolicy {
        &self.cors
    }

    /// Apply origin and method policy, then relay to the upstream function
    pub async fn forward(&self, request: InboundRequest) -> NormalizedResponse {
        let origin = request.origin.as_deref();
        let cors = self.cors.headers_for(origin);

        // Preflight is answered before any method check
        if request.method == Method::OPTIONS {
            return NormalizedResponse::preflight(cors);
        }

        if request.method != Method::GET && request.method != Method::POST {
            tracing::info!("Rejected {} request from origin {:?}", request.method, origin);
            return NormalizedResponse::method_not_allowed(cors);
        }

        if let Some(origin) = origin {
            if !self.cors.is_allowed(origin) {
                tracing::debug!("Origin {} not in allow-list, answering with {}", origin, cors.allow_origin);
            }
        }

        let method = request.method.clone();
        let outbound = OutboundRequest::relay(request);

        match self.upstream.send(outbound).await {
            Ok(response) => {
                tracing::info!(
                    "Relayed {} to upstream: status={}, origin={}",
                    method,
                    response.status,
                    cors.allow_origin
                );
                NormalizedResponse::json(response.status, cors, normalize_body(&response.body))
            }
            Err(e) => {
                tracing::error!("Proxy error reaching {}: {}", self.upstream.function_url(), e);
                NormalizedResponse::upstream_unreachable(cors)
            }
        }
    }

    /// Answer a POST whose body could not be read (too large, truncated)
    ///
    /// The status is the one the body reader chose; CORS headers are the same
    /// as on every other response.
    pub fn reject_body(&self, origin: Option<&str>, status: u16, message: &str) -> NormalizedResponse {
        tracing::warn!("Rejected unreadable request body from origin {:?}: {}", origin, message);
        NormalizedResponse::error(status, self.cors.headers_for(origin), message)
    }
}

/// Parse an upstream body without ever failing
///
/// Empty text becomes `{}`, valid JSON is kept, anything else is wrapped as
/// `{"error": <raw text>}`.
pub fn normalize_body(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return json!({});
    }

    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Upstream returned a non-JSON body: {}", e);
            json!({ "error": raw })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_valid_json() {
        let body = normalize_body(r#"{"matches":[{"matched_user_id":"a"}]}"#);
        assert_eq!(body, json!({ "matches": [{ "matched_user_id": "a" }] }));
    }

    #[test]
    fn test_normalize_wraps_plain_text() {
        assert_eq!(normalize_body("oops"), json!({ "error": "oops" }));
    }

    #[test]
    fn test_normalize_wraps_truncated_json() {
        assert_eq!(normalize_body(r#"{"matches": ["#), json!({ "error": r#"{"matches": ["# }));
    }

    #[test]
    fn test_normalize_empty_body() {
        assert_eq!(normalize_body(""), json!({}));
        assert_eq!(normalize_body("  \n"), json!({}));
    }

    #[test]
    fn test_normalize_keeps_non_object_json() {
        assert_eq!(normalize_body("[1,2]"), json!([1, 2]));
    }
}

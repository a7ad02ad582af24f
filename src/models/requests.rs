use actix_web::http::header::HeaderValue;
use actix_web::http::Method;
use actix_web::web::Bytes;
use actix_web::HttpRequest;

pub const ORIGIN_HEADER: &str = "origin";
pub const AUTHORIZATION_HEADER: &str = "authorization";
pub const API_KEY_HEADER: &str = "apikey";

/// A request arriving at the edge proxy
///
/// The body is never inspected; it is relayed as-is. Credential headers are
/// kept as raw header values so non-ASCII bytes survive the hop.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub origin: Option<String>,
    pub authorization: Option<HeaderValue>,
    pub api_key: Option<HeaderValue>,
    pub body: Bytes,
}

impl InboundRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            origin: None,
            authorization: None,
            api_key: None,
            body: Bytes::new(),
        }
    }

    /// Capture the pieces of an actix request the proxy cares about
    pub fn from_http(req: &HttpRequest, body: Bytes) -> Self {
        let raw = |name: &str| req.headers().get(name).cloned();

        Self {
            method: req.method().clone(),
            // An origin that is not valid text can never match the allow-list
            origin: raw(ORIGIN_HEADER)
                .and_then(|v| v.to_str().ok().map(str::to_string)),
            authorization: raw(AUTHORIZATION_HEADER),
            api_key: raw(API_KEY_HEADER),
            body,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_authorization(mut self, value: HeaderValue) -> Self {
        self.authorization = Some(value);
        self
    }

    pub fn with_api_key(mut self, value: HeaderValue) -> Self {
        self.api_key = Some(value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

/// The single POST issued to the upstream function
///
/// Only the credential headers listed here are ever forwarded.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub authorization: Option<reqwest::header::HeaderValue>,
    pub api_key: Option<reqwest::header::HeaderValue>,
    pub body: Bytes,
}

impl OutboundRequest {
    /// Build the upstream call for an inbound GET or POST.
    ///
    /// GET never carries a payload, and an empty POST body becomes `{}`.
    pub fn relay(inbound: InboundRequest) -> Self {
        let body = if inbound.method == Method::POST && !inbound.body.is_empty() {
            inbound.body
        } else {
            Bytes::from_static(b"{}")
        };

        Self {
            authorization: inbound
                .authorization
                .as_ref()
                .and_then(|v| rewrap(AUTHORIZATION_HEADER, v)),
            api_key: inbound
                .api_key
                .as_ref()
                .and_then(|v| rewrap(API_KEY_HEADER, v)),
            body,
        }
    }
}

/// Copy an actix header value into reqwest's type byte for byte.
///
/// Both sides accept the same byte set, so this only fails on values actix
/// itself would not have parsed.
fn rewrap(name: &str, value: &HeaderValue) -> Option<reqwest::header::HeaderValue> {
    match reqwest::header::HeaderValue::from_bytes(value.as_bytes()) {
        Ok(mut converted) => {
            converted.set_sensitive(value.is_sensitive());
            Some(converted)
        }
        Err(e) => {
            tracing::warn!("Dropping unforwardable {} header: {}", name, e);
            None
        }
    }
}

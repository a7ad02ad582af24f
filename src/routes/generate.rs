use actix_web::http::{Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use crate::core::EdgeProxy;
use crate::models::requests::ORIGIN_HEADER;
use crate::models::{HealthResponse, InboundRequest, NormalizedResponse};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<EdgeProxy>,
}

/// Largest request body relayed upstream
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Configure the relay routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .service(
            web::resource("/generate-matches")
                .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
                // Every method reaches the handler so policy and CORS headers stay in one place
                .route(web::route().to(generate_matches)),
        );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Generate matches relay
///
/// OPTIONS|GET|POST /api/generate-matches
///
/// Forwards `authorization` and `apikey` to the upstream function and mirrors
/// its status. The body is always JSON except for preflight, including when
/// the request body is over [`MAX_BODY_BYTES`].
async fn generate_matches(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Result<web::Bytes, actix_web::Error>,
) -> HttpResponse {
    let body = match body {
        Ok(body) => body,
        Err(e) if *req.method() == Method::POST => {
            let status = e.as_response_error().status_code().as_u16();
            let origin = req
                .headers()
                .get(ORIGIN_HEADER)
                .and_then(|v| v.to_str().ok());
            return into_http_response(state.proxy.reject_body(origin, status, &e.to_string()));
        }
        // Only POST bodies are relayed
        Err(_) => web::Bytes::new(),
    };

    let inbound = InboundRequest::from_http(&req, body);
    let normalized = state.proxy.forward(inbound).await;
    into_http_response(normalized)
}

/// Render a normalized proxy response
pub fn into_http_response(normalized: NormalizedResponse) -> HttpResponse {
    let status = StatusCode::from_u16(normalized.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);

    for (name, value) in normalized.cors.pairs() {
        builder.insert_header((name, value));
    }

    match normalized.body {
        Some(body) => builder.json(body),
        None => builder.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CorsHeaders;
    use actix_web::body::MessageBody;
    use serde_json::json;

    fn cors() -> CorsHeaders {
        CorsHeaders {
            allow_origin: "http://localhost:5173".to_string(),
        }
    }

    #[test]
    fn test_preflight_renders_empty_body() {
        let response = into_http_response(NormalizedResponse::preflight(cors()));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("vary").unwrap(), "Origin");

        let body = response.into_body().try_into_bytes().unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_payload_errors_render_as_json_with_cors() {
        let response = into_http_response(NormalizedResponse::error(413, cors(), "payload reached size limit"));
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers().get("vary").unwrap(), "Origin");
        assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn test_json_body_keeps_upstream_status() {
        let response = into_http_response(NormalizedResponse::json(201, cors(), json!({ "matches": [] })));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
    }
}

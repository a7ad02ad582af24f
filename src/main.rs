use actix_web::{middleware, web, App, HttpServer};
use match_relay::config::Settings;
use match_relay::core::{CorsPolicy, EdgeProxy};
use match_relay::routes::{self, generate::AppState};
use match_relay::services::UpstreamClient;
use std::io;
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    settings.logging.init();

    info!("Starting match relay...");

    let cors = CorsPolicy::new(settings.cors.allowed_origins.clone())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "cors.allowed_origins is empty"))?;

    let upstream = UpstreamClient::new(settings.upstream.function_url.clone(), settings.upstream.timeout())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    info!(
        "Relaying to {} (timeout: {}s, default origin: {})",
        upstream.function_url(),
        settings.upstream.timeout_secs,
        cors.default_origin()
    );

    let app_state = AppState {
        proxy: Arc::new(EdgeProxy::new(cors, upstream)),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

//! Run one generate-matches cycle from the command line, the same way the
//! dashboard does, and print the ranked matches as JSON.

use match_relay::config::Settings;
use match_relay::core::{GenerationState, MatchController};
use match_relay::services::{ProxyClient, StoredSession, TracingNotifier};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    settings.logging.init();

    let client = &settings.client;
    let proxy = match ProxyClient::new(client.proxy_url.clone(), client.api_key.clone(), client.timeout()) {
        Ok(proxy) => proxy,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let session = StoredSession::new(client.access_token.clone());
    let mut controller = MatchController::new(session, proxy, TracingNotifier);

    match controller.generate().await {
        GenerationState::Completed { matches, .. } => match serde_json::to_string_pretty(matches) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("Failed to serialize matches: {}", e);
                ExitCode::FAILURE
            }
        },
        GenerationState::Failed { message, .. } => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
        // generate() always settles in Completed or Failed
        GenerationState::Idle | GenerationState::Loading { .. } => ExitCode::FAILURE,
    }
}

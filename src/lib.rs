//! Match Relay - edge proxy and dashboard controller for match generation
//!
//! The edge proxy relays "generate matches" calls from the dashboard to an
//! external function, applying origin and method policy and normalizing
//! whatever comes back. The match controller drives the dashboard's
//! generate/refresh flow on top of it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::config::{Settings, SettingsError};
pub use crate::core::{normalize_body, CorsPolicy, EdgeProxy, GenerateError, GenerationState, MatchController};
pub use models::{InboundRequest, Match, Notification, NotificationKind, NormalizedResponse};
pub use services::{MemoryNotifier, ProxyClient, StoredSession, TracingNotifier, UpstreamClient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let policy = CorsPolicy::new(vec!["http://localhost:5173".to_string()]).unwrap();
        assert_eq!(policy.resolve_origin(None), "http://localhost:5173");
    }
}

// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Match, Notification, NotificationKind};
pub use requests::{InboundRequest, OutboundRequest};
pub use responses::{ErrorResponse, GenerateMatchesResponse, HealthResponse, NormalizedResponse};

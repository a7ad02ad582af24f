// Core relay and generation logic
pub mod controller;
pub mod cors;
pub mod proxy;

pub use controller::{GenerateError, GenerationState, MatchController};
pub use cors::{CorsHeaders, CorsPolicy};
pub use proxy::{normalize_body, EdgeProxy};

// Service exports
pub mod notifier;
pub mod proxy_client;
pub mod session;
pub mod upstream;

pub use notifier::{MemoryNotifier, Notifier, TracingNotifier};
pub use proxy_client::{ProxyClient, ProxyReply};
pub use session::{Session, SessionError, SessionProvider, StoredSession};
pub use upstream::{UpstreamClient, UpstreamError, UpstreamResponse};

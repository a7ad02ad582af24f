use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use validator::Validate;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[validate(nested)]
    pub upstream: UpstreamSettings,
    #[validate(nested)]
    pub cors: CorsSettings,
    #[serde(default)]
    #[validate(nested)]
    pub client: ClientSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// The external match-generation function every request is relayed to
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpstreamSettings {
    #[validate(url)]
    pub function_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CorsSettings {
    /// The first entry doubles as the fallback for unknown origins
    #[validate(length(min = 1))]
    pub allowed_origins: Vec<String>,
}

/// Settings used by the dashboard side when calling the proxy
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientSettings {
    #[validate(url)]
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
    /// Publishable key sent as the `apikey` header
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            api_key: None,
            access_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_proxy_url() -> String { "http://localhost:8080/api/generate-matches".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl LoggingSettings {
    /// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.level));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true);

        if self.format == "pretty" {
            subscriber.pretty().init();
        } else {
            subscriber.compact().init();
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with RELAY__)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Development overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., RELAY__UPSTREAM__FUNCTION_URL -> upstream.function_url
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, SettingsError> {
        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("RELAY")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Result<Settings, SettingsError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Settings::finish(config)
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let settings = parse(
            r#"
            [upstream]
            function_url = "https://functions.example.com/v1/generate-matches"

            [cors]
            allowed_origins = ["https://atlas.example.com", "http://localhost:5173"]
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.upstream.timeout_secs, 30);
        assert_eq!(settings.client.proxy_url, "http://localhost:8080/api/generate-matches");
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.cors.allowed_origins[0], "https://atlas.example.com");
    }

    #[test]
    fn test_empty_allow_list_rejected() {
        let result = parse(
            r#"
            [upstream]
            function_url = "https://functions.example.com/v1/generate-matches"

            [cors]
            allowed_origins = []
            "#,
        );

        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_invalid_function_url_rejected() {
        let result = parse(
            r#"
            [upstream]
            function_url = "not a url"

            [cors]
            allowed_origins = ["https://atlas.example.com"]
            "#,
        );

        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "compact");
    }
}

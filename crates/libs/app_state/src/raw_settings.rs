use serde::Deserialize;
use street_imagery::SelectorConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    /// Pipeline tuning. Every key is optional and falls back to the built-in default.
    #[serde(default)]
    pub imagery: SelectorConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    /// Mapillary access token, usually supplied through `APP__SECRETS__IMAGERY_TOKEN`.
    #[serde(default)]
    pub imagery_token: String,
}

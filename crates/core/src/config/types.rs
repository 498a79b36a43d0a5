use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub jackett: JackettConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Jackett connection configuration.
///
/// Replaced wholesale on each configuration save; there is no partial
/// mutation of a live config.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JackettConfig {
    /// Whether the bridge is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Jackett server URL (e.g., "http://localhost:9117")
    pub host: String,
    /// Jackett API key
    pub api_key: String,
    /// Jackett admin password, if the dashboard is password protected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Whitelist of Jackett indexer ids. Empty means all configured indexers.
    #[serde(default)]
    pub indexers: Vec<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Attempts for the indexer listing call (default: 3).
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Fixed delay between retry attempts in seconds (default: 5).
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
    /// Interval between periodic registry syncs in hours (default: 12).
    #[serde(default = "default_sync_interval")]
    pub sync_interval_hours: u64,
    /// Download volume factor advertised in descriptors. Jackett does not
    /// expose free-leech state, so this is deployment policy.
    #[serde(default = "default_download_factor")]
    pub download_volume_factor: f32,
    /// Upload volume factor advertised in descriptors.
    #[serde(default = "default_upload_factor")]
    pub upload_volume_factor: f32,
}

fn default_timeout() -> u32 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    5
}

fn default_sync_interval() -> u64 {
    12
}

fn default_download_factor() -> f32 {
    0.0
}

fn default_upload_factor() -> f32 {
    1.0
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub jackett: SanitizedJackettConfig,
}

/// Sanitized Jackett config (API key and password hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedJackettConfig {
    pub enabled: bool,
    pub host: String,
    pub api_key_configured: bool,
    pub password_configured: bool,
    pub indexers: Vec<String>,
    pub timeout_secs: u32,
    pub sync_interval_hours: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            jackett: SanitizedJackettConfig {
                enabled: config.jackett.enabled,
                host: config.jackett.host.clone(),
                api_key_configured: !config.jackett.api_key.is_empty(),
                password_configured: config
                    .jackett
                    .password
                    .as_ref()
                    .is_some_and(|p| !p.is_empty()),
                indexers: config.jackett.indexers.clone(),
                timeout_secs: config.jackett.timeout_secs,
                sync_interval_hours: config.jackett.sync_interval_hours,
            },
        }
    }
}

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - When enabled, the Jackett host and API key are present and the host
///   looks like an HTTP URL
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Jackett validation only matters once the bridge is switched on; an
    // unconfigured, disabled instance is a valid state.
    if config.jackett.enabled {
        if config.jackett.host.is_empty() {
            return Err(ConfigError::ValidationError(
                "jackett.host is required when jackett.enabled is true".to_string(),
            ));
        }
        if !config.jackett.host.starts_with("http") {
            return Err(ConfigError::ValidationError(format!(
                "jackett.host must be an http(s) URL, got {}",
                config.jackett.host
            )));
        }
        if config.jackett.api_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "jackett.api_key is required when jackett.enabled is true".to_string(),
            ));
        }
    }

    if config.jackett.retry_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "jackett.retry_attempts cannot be 0".to_string(),
        ));
    }

    Ok(())
}

use std::sync::Arc;

use jackbridge_core::{Config, InMemoryRegistry, JackettPlugin, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    plugin: Arc<JackettPlugin>,
    registry: Arc<InMemoryRegistry>,
}

impl AppState {
    pub fn new(
        config: Config,
        plugin: Arc<JackettPlugin>,
        registry: Arc<InMemoryRegistry>,
    ) -> Self {
        Self {
            config,
            plugin,
            registry,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn plugin(&self) -> &JackettPlugin {
        &self.plugin
    }

    pub fn registry(&self) -> &InMemoryRegistry {
        &self.registry
    }
}

pub mod config;
pub mod descriptor;
pub mod jackett;
pub mod metrics;
pub mod plugin;
pub mod registry;
pub mod relay;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, JackettConfig,
    SanitizedConfig, ServerConfig,
};
pub use descriptor::{map_indexer, IndexerDescriptor, VolumePolicy};
pub use jackett::{ClientError, IndexerKind, JackettClient, RawIndexerRecord};
pub use plugin::{IndexerOption, JackettPlugin, PluginError};
pub use registry::{
    select_records, InMemoryRegistry, IndexerRegistry, RegistrationLedger, RegistryError,
    RegistrySynchronizer, SyncError, SyncReport,
};
pub use relay::{parse_torznab, RelayError, SearchHit, SearchRelay};

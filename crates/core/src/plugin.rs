//! The bridge's host-facing facade.
//!
//! Wires the Jackett client, the registry synchronizer and the search
//! relay behind the small set of operations a host lifecycle needs:
//! status, indexer options, sync, search, shutdown.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::JackettConfig;
use crate::descriptor::{map_indexer, IndexerDescriptor, VolumePolicy};
use crate::jackett::{ClientError, JackettClient};
use crate::registry::{
    select_records, IndexerRegistry, RegistrySynchronizer, SyncError, SyncReport,
};
use crate::relay::{SearchHit, SearchRelay};

/// One `{value, text}` entry for the host's indexer picker.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IndexerOption {
    pub value: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Jackett host and API key are not configured")]
    NotConfigured,

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// The Jackett bridge plugin instance.
///
/// Owns one [`JackettConfig`] for its whole lifetime; reconfiguration means
/// constructing a fresh instance (config is replaced wholesale, never
/// partially mutated).
pub struct JackettPlugin {
    config: JackettConfig,
    client: Arc<JackettClient>,
    synchronizer: RegistrySynchronizer,
    relay: SearchRelay,
}

impl JackettPlugin {
    pub fn new(
        config: JackettConfig,
        registry: Arc<dyn IndexerRegistry>,
    ) -> Result<Self, PluginError> {
        let client = Arc::new(JackettClient::new(&config)?);
        Ok(Self {
            relay: SearchRelay::new(client.clone()),
            synchronizer: RegistrySynchronizer::new(registry),
            client,
            config,
        })
    }

    /// Whether the plugin is operational: enabled with host and API key set.
    pub fn status(&self) -> bool {
        self.config.enabled && self.configured()
    }

    fn configured(&self) -> bool {
        !self.config.host.is_empty() && !self.config.api_key.is_empty()
    }

    fn volume_policy(&self) -> VolumePolicy {
        VolumePolicy {
            download_factor: self.config.download_volume_factor,
            upload_factor: self.config.upload_volume_factor,
        }
    }

    /// Fetch the configured Jackett indexers as picker options.
    pub async fn indexer_options(&self) -> Result<Vec<IndexerOption>, PluginError> {
        if !self.configured() {
            return Err(PluginError::NotConfigured);
        }

        self.client.authenticate().await;
        let records = self.client.fetch_indexers().await?;
        Ok(records
            .into_iter()
            .filter(|r| !r.id.is_empty())
            .map(|r| IndexerOption {
                value: r.id,
                text: r.name,
            })
            .collect())
    }

    /// Run one full sync pass: list Jackett's indexers, map the selected
    /// ones to descriptors and reconcile the host registry against them.
    ///
    /// Runs whenever host and API key are present, enabled or not, so a
    /// freshly saved configuration takes effect before the enabled switch
    /// is flipped.
    pub async fn sync(&self) -> Result<SyncReport, PluginError> {
        if !self.configured() {
            return Err(PluginError::NotConfigured);
        }

        self.client.authenticate().await;
        let records = self.client.fetch_indexers().await?;
        let selected = select_records(records, &self.config.indexers);

        let policy = self.volume_policy();
        let descriptors: Vec<IndexerDescriptor> = selected
            .iter()
            .filter_map(|record| {
                let mapped =
                    map_indexer(record, self.client.base_url(), &self.config.api_key, policy);
                if mapped.is_none() {
                    warn!(id = %record.id, name = %record.name, "Skipping malformed indexer record");
                }
                mapped
            })
            .collect();

        let report = self.synchronizer.sync(descriptors).await?;
        info!(
            registered = report.registered,
            "Jackett indexers synced to registry"
        );
        Ok(report)
    }

    /// Relay a keyword search across the whitelisted indexers.
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchHit>, PluginError> {
        if !self.configured() {
            return Err(PluginError::NotConfigured);
        }
        self.client.authenticate().await;
        Ok(self.relay.search(keyword, &self.config.indexers).await?)
    }

    /// Remove everything this instance registered and drop session state.
    pub async fn shutdown(&self) -> usize {
        let removed = self.synchronizer.teardown().await;
        info!(removed = removed, "Jackett bridge stopped");
        removed
    }

    /// Descriptor ids currently owned by this instance.
    pub async fn ledger_ids(&self) -> Vec<String> {
        self.synchronizer.ledger_ids().await
    }
}

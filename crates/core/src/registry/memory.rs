use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::descriptor::IndexerDescriptor;

use super::traits::{IndexerRegistry, RegistryError};

/// In-process registry implementation.
///
/// Backs the bridge server's own registry view; hosts embedding the core
/// crate provide their own [`IndexerRegistry`] adapter instead.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    entries: RwLock<HashMap<String, IndexerDescriptor>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn get(&self, id: &str) -> Option<IndexerDescriptor> {
        self.entries.read().await.get(id).cloned()
    }
}

#[async_trait]
impl IndexerRegistry for InMemoryRegistry {
    async fn add(&self, descriptor: IndexerDescriptor) -> Result<(), RegistryError> {
        debug!(id = %descriptor.id, "Registering indexer descriptor");
        self.entries
            .write()
            .await
            .insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), RegistryError> {
        match self.entries.write().await.remove(id) {
            Some(_) => {
                debug!(id = %id, "Removed indexer descriptor");
                Ok(())
            }
            None => Err(RegistryError::NotFound(id.to_string())),
        }
    }

    async fn list(&self) -> Result<Vec<IndexerDescriptor>, RegistryError> {
        let mut entries: Vec<IndexerDescriptor> =
            self.entries.read().await.values().cloned().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(entries)
    }
}

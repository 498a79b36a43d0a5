//! Mock host registry for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::descriptor::IndexerDescriptor;
use crate::registry::{IndexerRegistry, RegistryError};

/// Mock implementation of the [`IndexerRegistry`] trait.
///
/// Provides controllable behavior for testing:
/// - Record every add/remove call for assertions
/// - Fail registration of specific descriptor ids
/// - Simulate a host without registry support (fail-closed path)
/// - Delay adds to exercise the non-reentrancy guard
pub struct MockRegistry {
    entries: RwLock<HashMap<String, IndexerDescriptor>>,
    added: RwLock<Vec<String>>,
    removed: RwLock<Vec<String>>,
    failing_ids: RwLock<HashSet<String>>,
    unsupported: RwLock<bool>,
    add_delay: RwLock<Option<Duration>>,
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            added: RwLock::new(Vec::new()),
            removed: RwLock::new(Vec::new()),
            failing_ids: RwLock::new(HashSet::new()),
            unsupported: RwLock::new(false),
            add_delay: RwLock::new(None),
        }
    }

    /// Make `add` fail for one descriptor id.
    pub async fn fail_add_for(&self, id: &str) {
        self.failing_ids.write().await.insert(id.to_string());
    }

    /// Simulate a host whose registry operations are unavailable.
    pub async fn set_unsupported(&self, unsupported: bool) {
        *self.unsupported.write().await = unsupported;
    }

    /// Delay every `add`, to hold a sync open while another is attempted.
    pub async fn set_add_delay(&self, delay: Duration) {
        *self.add_delay.write().await = Some(delay);
    }

    /// Every id passed to `add`, in call order.
    pub async fn added_ids(&self) -> Vec<String> {
        self.added.read().await.clone()
    }

    /// Every id passed to `remove`, in call order.
    pub async fn removed_ids(&self) -> Vec<String> {
        self.removed.read().await.clone()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.entries.read().await.contains_key(id)
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
impl IndexerRegistry for MockRegistry {
    async fn add(&self, descriptor: IndexerDescriptor) -> Result<(), RegistryError> {
        if *self.unsupported.read().await {
            return Err(RegistryError::Unsupported(
                "mock host has no add operation".to_string(),
            ));
        }
        if let Some(delay) = *self.add_delay.read().await {
            tokio::time::sleep(delay).await;
        }

        self.added.write().await.push(descriptor.id.clone());

        if self.failing_ids.read().await.contains(&descriptor.id) {
            return Err(RegistryError::Internal(format!(
                "injected failure for {}",
                descriptor.id
            )));
        }

        self.entries
            .write()
            .await
            .insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), RegistryError> {
        if *self.unsupported.read().await {
            return Err(RegistryError::Unsupported(
                "mock host has no remove operation".to_string(),
            ));
        }

        self.removed.write().await.push(id.to_string());

        match self.entries.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(RegistryError::NotFound(id.to_string())),
        }
    }

    async fn list(&self) -> Result<Vec<IndexerDescriptor>, RegistryError> {
        if *self.unsupported.read().await {
            return Err(RegistryError::Unsupported(
                "mock host has no list operation".to_string(),
            ));
        }
        Ok(self.entries.read().await.values().cloned().collect())
    }
}

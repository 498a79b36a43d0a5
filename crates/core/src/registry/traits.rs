use async_trait::async_trait;
use thiserror::Error;

use crate::descriptor::IndexerDescriptor;

/// Errors surfaced by a host registry implementation.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Registry operation not supported by this host: {0}")]
    Unsupported(String),

    #[error("No such registry entry: {0}")]
    NotFound(String),

    #[error("Registry internal error: {0}")]
    Internal(String),
}

/// The one interface a host must provide to receive bridge descriptors.
///
/// `add` replaces an existing entry with the same id. `remove` of an absent
/// id is reported as [`RegistryError::NotFound`] but is harmless to the
/// synchronizer, which treats it as already-gone.
#[async_trait]
pub trait IndexerRegistry: Send + Sync {
    /// Register or replace one indexer descriptor.
    async fn add(&self, descriptor: IndexerDescriptor) -> Result<(), RegistryError>;

    /// Remove the descriptor with the given id.
    async fn remove(&self, id: &str) -> Result<(), RegistryError>;

    /// All currently registered descriptors.
    async fn list(&self) -> Result<Vec<IndexerDescriptor>, RegistryError>;
}

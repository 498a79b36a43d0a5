//! Host indexer registry abstraction and synchronization.
//!
//! The host is required to implement exactly one interface,
//! [`IndexerRegistry`]; host-version differences are adapter
//! implementations chosen at composition time, never runtime probing.
//! [`RegistrySynchronizer`] reconciles the registry's bridge-owned entries
//! against the current descriptor set, using a [`RegistrationLedger`] to
//! remember what it added so teardown never touches foreign entries.

mod ledger;
mod memory;
mod sync;
mod traits;

pub use ledger::RegistrationLedger;
pub use memory::InMemoryRegistry;
pub use sync::{select_records, RegistrySynchronizer, SyncError, SyncReport};
pub use traits::{IndexerRegistry, RegistryError};

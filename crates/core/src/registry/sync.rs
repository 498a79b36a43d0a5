//! Reconciliation of bridge descriptors against the host registry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::descriptor::IndexerDescriptor;
use crate::jackett::RawIndexerRecord;
use crate::metrics;

use super::ledger::RegistrationLedger;
use super::traits::{IndexerRegistry, RegistryError};

/// Outcome of one sync pass.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Descriptors successfully registered this pass.
    pub registered: usize,
    /// Stale entries removed before registration.
    pub removed: usize,
    /// Per-descriptor registration failures (id -> reason).
    pub errors: HashMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("A sync is already in progress")]
    SyncInProgress,

    #[error("Host registry unavailable: {0}")]
    RegistryUnavailable(String),
}

/// Keeps the host registry's bridge-owned entries equal to the current
/// descriptor set without disturbing anything else in the registry.
///
/// The ledger lives behind a mutex that doubles as the non-reentrancy
/// guard: a sync that arrives while another is in flight is rejected with
/// [`SyncError::SyncInProgress`] instead of racing the teardown phase.
pub struct RegistrySynchronizer {
    registry: Arc<dyn IndexerRegistry>,
    ledger: Mutex<RegistrationLedger>,
}

impl RegistrySynchronizer {
    pub fn new(registry: Arc<dyn IndexerRegistry>) -> Self {
        Self {
            registry,
            ledger: Mutex::new(RegistrationLedger::new()),
        }
    }

    /// Make the registry's bridge-owned entries exactly the given set.
    ///
    /// Every id in the ledger is removed first, so the end state is solely
    /// determined by `descriptors` and repeated configuration changes can
    /// never accumulate stale entries. One descriptor failing to register
    /// is logged and skipped; an unsupported registry fails the whole pass
    /// closed, leaving zero bridge registrations behind.
    pub async fn sync(
        &self,
        descriptors: Vec<IndexerDescriptor>,
    ) -> Result<SyncReport, SyncError> {
        let mut ledger = self
            .ledger
            .try_lock()
            .map_err(|_| SyncError::SyncInProgress)?;

        let mut report = SyncReport {
            removed: clear_owned(&self.registry, &mut ledger).await,
            ..Default::default()
        };

        for descriptor in descriptors {
            let id = descriptor.id.clone();
            match self.registry.add(descriptor).await {
                Ok(()) => {
                    ledger.record(&id);
                    report.registered += 1;
                }
                Err(RegistryError::Unsupported(reason)) => {
                    // The host cannot register anything; roll back what this
                    // pass already added and report the failure whole.
                    warn!(reason = %reason, "Host registry unsupported, failing sync closed");
                    clear_owned(&self.registry, &mut ledger).await;
                    metrics::SYNC_RUNS.with_label_values(&["failed"]).inc();
                    return Err(SyncError::RegistryUnavailable(reason));
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "Failed to register indexer descriptor");
                    report.errors.insert(id, e.to_string());
                }
            }
        }

        metrics::SYNC_RUNS.with_label_values(&["ok"]).inc();
        metrics::REGISTERED_INDEXERS.set(ledger.len() as i64);
        info!(
            registered = report.registered,
            removed = report.removed,
            failed = report.errors.len(),
            "Registry sync complete"
        );
        Ok(report)
    }

    /// Remove every bridge-owned entry from the registry. Safe to call with
    /// an empty ledger; invoked on plugin stop and before each sync pass.
    pub async fn teardown(&self) -> usize {
        let mut ledger = self.ledger.lock().await;
        let removed = clear_owned(&self.registry, &mut ledger).await;
        metrics::REGISTERED_INDEXERS.set(0);
        if removed > 0 {
            info!(removed = removed, "Removed bridge indexers from registry");
        }
        removed
    }

    /// Ids currently recorded in the ledger, in registration order.
    pub async fn ledger_ids(&self) -> Vec<String> {
        self.ledger.lock().await.ids().to_vec()
    }
}

async fn clear_owned(
    registry: &Arc<dyn IndexerRegistry>,
    ledger: &mut RegistrationLedger,
) -> usize {
    let mut removed = 0;
    for id in ledger.drain() {
        match registry.remove(&id).await {
            Ok(()) => removed += 1,
            // Already gone is fine: the goal is absence.
            Err(RegistryError::NotFound(_)) => {}
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to remove indexer descriptor");
            }
        }
    }
    debug!(removed = removed, "Cleared bridge-owned registry entries");
    removed
}

/// Resolve which raw records a sync or search pass covers: the whitelist
/// when one is configured, otherwise all of them. Matching is by raw
/// Jackett id, case-sensitively.
pub fn select_records(
    records: Vec<RawIndexerRecord>,
    whitelist: &[String],
) -> Vec<RawIndexerRecord> {
    if whitelist.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| whitelist.iter().any(|w| w == &r.id))
        .collect()
}

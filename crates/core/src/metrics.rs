//! Prometheus metrics for core components.
//!
//! Covers the Jackett client, registry synchronization and the search
//! relay. The server crate registers these into its exported registry.

use once_cell::sync::Lazy;
use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};

/// Sync passes by result ("ok" / "failed").
pub static SYNC_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("jackbridge_sync_runs_total", "Registry sync passes"),
        &["result"],
    )
    .unwrap()
});

/// Descriptors currently registered in the host registry.
pub static REGISTERED_INDEXERS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "jackbridge_registered_indexers",
        "Indexer descriptors currently registered",
    )
    .unwrap()
});

/// Requests issued against the Jackett API, by operation.
pub static JACKETT_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("jackbridge_jackett_requests_total", "Jackett API requests"),
        &["operation"], // "list_indexers", "query"
    )
    .unwrap()
});

/// Relay searches executed.
pub static RELAY_SEARCHES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("jackbridge_relay_searches_total", "Relay searches executed").unwrap()
});

/// Relay search duration in seconds.
pub static RELAY_SEARCH_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "jackbridge_relay_search_duration_seconds",
            "Duration of relay searches",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
    )
    .unwrap()
});

/// Register all core metrics into the given registry.
pub fn register_core_metrics(registry: &Registry) {
    registry.register(Box::new(SYNC_RUNS.clone())).ok();
    registry.register(Box::new(REGISTERED_INDEXERS.clone())).ok();
    registry.register(Box::new(JACKETT_REQUESTS.clone())).ok();
    registry.register(Box::new(RELAY_SEARCHES.clone())).ok();
    registry
        .register(Box::new(RELAY_SEARCH_DURATION.clone()))
        .ok();
}

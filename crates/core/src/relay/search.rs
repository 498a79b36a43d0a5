//! Fan-out of one keyword search across the selected indexers.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::jackett::{ClientError, JackettClient};
use crate::metrics;
use crate::registry::select_records;

use super::torznab::parse_torznab;
use super::types::SearchHit;

/// Relays keyword searches to Jackett and normalizes the feeds.
pub struct SearchRelay {
    client: Arc<JackettClient>,
}

impl SearchRelay {
    pub fn new(client: Arc<JackettClient>) -> Self {
        Self { client }
    }

    /// Search the whitelisted indexers (all configured ones when the
    /// whitelist is empty) and aggregate their hits in indexer order.
    ///
    /// A failing or unparsable indexer is logged and skipped; only the
    /// inability to list indexers at all fails the search.
    pub async fn search(
        &self,
        keyword: &str,
        whitelist: &[String],
    ) -> Result<Vec<SearchHit>, ClientError> {
        let start = Instant::now();

        let records = self.client.fetch_indexers().await?;
        let selected = select_records(records, whitelist);
        debug!(
            keyword = %keyword,
            indexers = selected.len(),
            "Relaying search"
        );

        let queries: Vec<_> = selected
            .iter()
            .map(|record| {
                let client = self.client.clone();
                let id = record.id.clone();
                async move {
                    let response = client.query(Some(&id), keyword).await;
                    (id, response)
                }
            })
            .collect();

        // join_all preserves input order, which keeps the aggregate list in
        // indexer response order with no cross-indexer re-ranking.
        let responses = futures::future::join_all(queries).await;

        let mut hits = Vec::new();
        for (indexer, response) in responses {
            let xml = match response {
                Ok(xml) => xml,
                Err(e) => {
                    warn!(indexer = %indexer, error = %e, "Indexer query failed, skipping");
                    continue;
                }
            };
            match parse_torznab(&xml, &indexer) {
                Ok(mut parsed) => {
                    debug!(indexer = %indexer, results = parsed.len(), "Indexer responded");
                    hits.append(&mut parsed);
                }
                Err(e) => {
                    warn!(indexer = %indexer, error = %e, "Unparsable feed, skipping");
                }
            }
        }

        metrics::RELAY_SEARCHES.inc();
        metrics::RELAY_SEARCH_DURATION.observe(start.elapsed().as_secs_f64());
        debug!(results = hits.len(), "Relay search complete");
        Ok(hits)
    }
}

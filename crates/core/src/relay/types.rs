use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One normalized result from a torznab feed.
///
/// Ephemeral: produced per search request, never persisted. Ordering across
/// indexers is whatever the feeds returned; ranking belongs to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Torrent title.
    pub title: String,
    /// Feed description, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// .torrent download URL (the feed's `link`).
    pub download_link: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Seeders, 0 when the feed omits the attribute.
    pub seeders: u32,
    /// Leechers (torznab `peers`), 0 when absent.
    pub leechers: u32,
    /// Link to the torrent's page (the feed's `guid`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_url: Option<String>,
    /// Jackett indexer id this hit came from.
    pub indexer: String,
    /// Category as reported by the feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Publication date, when the feed carries a parseable `pubDate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<DateTime<Utc>>,
    /// IMDB id, when the feed carries the torznab attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
}

/// Errors from torznab feed handling.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Malformed torznab feed: {0}")]
    Parse(String),
}

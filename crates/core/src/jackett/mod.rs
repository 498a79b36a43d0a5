//! Jackett HTTP API client.
//!
//! This module is the only place that talks to the Jackett service:
//! dashboard authentication, indexer enumeration and raw torznab queries.
//! Everything downstream works on the typed records it returns.

mod client;
mod types;

pub use client::JackettClient;
pub use types::*;

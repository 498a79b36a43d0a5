//! Host indexer descriptors and the Jackett-to-descriptor mapping.
//!
//! A descriptor is the host's structured view of one searchable indexer:
//! where to send queries, which parameters to attach and how to pick result
//! fields out of the torznab feed. Mapping is a pure transformation of one
//! raw Jackett record; it never touches the network or the registry.

mod mapper;
mod types;

pub use mapper::{map_indexer, VolumePolicy};
pub use types::*;

//! Test doubles for bridge components.
//!
//! Used by the crate's own unit tests and the server's integration tests.

mod mock_registry;

pub use mock_registry::MockRegistry;

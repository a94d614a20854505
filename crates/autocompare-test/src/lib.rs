//! Shared test fixtures for AutoCompare crates.
//!
//! - [`model`] - Comparable domain types (`Person`, `Order`, `LineItem`)
//! - [`engine`] - Stub engines recording, failing or panicking during compilation
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! autocompare-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use autocompare_test::{init_test_logging, Person, RecordingEngine};
//! ```

pub mod engine;
pub mod model;

pub use engine::{EngineFailure, FailingEngine, PanickingEngine, RecordingEngine};
pub use model::{LineItem, Order, Person, Timestamp};

use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

//! Log output for registration and compilation events.
//!
//! Enabled with the `logging` feature.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "autocompare_config=info";

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// Falls back to `autocompare_config=info` when `RUST_LOG` is unset or
/// invalid. Safe to call multiple times; only the first call has effect, and
/// an already installed global subscriber is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init();
    });
}

//! Tracing subscriber setup.
//!
//! The embedding service (REST layer, worker, or test harness) calls
//! [`init`] once at startup. Repeated calls are no-ops so integration
//! tests can share one process without fighting over the global
//! subscriber.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceCell<()> = OnceCell::new();

/// Initializes the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, defaulting to `info` for this crate.
/// Safe to call from multiple places; only the first call installs the
/// subscriber.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("wingmate=info"));

        // Ignore the error if a subscriber is already installed (e.g. by
        // the embedding application).
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

//! Test Logging Setup
//!
//! Opt-in structured logging for tests. Initialization is idempotent so any
//! test can call it without coordinating with the rest of the suite; output
//! goes through the test writer so it only shows for failing tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Initializes tracing for tests, once per process.
///
/// The filter honors `RUST_LOG` and defaults to `debug` for workspace crates.
pub fn init_test_tracing() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("repo_config=debug,chaincode_client=debug,repo_support=debug")
        });
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
        tracing::debug!("test tracing initialized");
    });
}

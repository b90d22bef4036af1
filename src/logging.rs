//! Tracing setup
//!
//! Library code logs through `tracing` macros; the binary installs a
//! subscriber once at startup. Logs go to stderr so command output on
//! stdout stays clean.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_DIRECTIVE: &str = "expense_cli=warn";

static TRACING_INIT: Once = Once::new();

/// Initialize the global tracing subscriber
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

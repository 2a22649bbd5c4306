//! Logging and tracing configuration
//!
//! Harness consumers call [`init`] once at the top of their test driver.
//! Levels are controlled by the `RUST_LOG` environment variable; default is
//! INFO for this crate, WARN for dependencies.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize tracing for harness output (stdout logging)
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("odbc_testkit=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .ok();
}

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// Ensure initialization happens only once
static INIT: Once = Once::new();

/// Initialize the logging system.
///
/// Log level can be set using the RUST_LOG environment variable.
/// Example: RUST_LOG=debug,hit_counter=trace
///
/// Without RUST_LOG the level is `info`, or `debug` when `debug_mode` is set.
/// `json` switches the console output to one JSON object per event.
pub fn init(debug_mode: bool, json: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(debug_mode)));

        let registry = tracing_subscriber::registry().with(filter);

        if json {
            registry
                .with(fmt::layer().json().with_target(true).with_line_number(true))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true) // Include module path in logs
                        .with_thread_ids(true) // Requests run on many worker threads
                        .with_line_number(true),
                )
                .init();
        }

        announce(debug_mode, json);
    });
}

fn announce(debug_mode: bool, json: bool) {
    tracing::info!(debug_mode, json, "Logging initialized");
}

fn default_directive(debug_mode: bool) -> &'static str {
    if debug_mode {
        "debug"
    } else {
        "info"
    }
}

/// Macro for logging store operations with timing
#[macro_export]
macro_rules! store_op {
    ($operation:expr, $key:expr, $result:expr, $elapsed_ms:expr) => {
        tracing::debug!(
            operation = $operation,
            key = $key,
            success = $result.is_ok(),
            elapsed_ms = $elapsed_ms,
            "Store operation"
        )
    };
}

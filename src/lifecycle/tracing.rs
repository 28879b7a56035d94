//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber for the binary.
//!
//! Logs go to stderr so the rendered report on stdout stays clean. `RUST_LOG`
//! wins when set; otherwise the `-v` count picks the level:
//!
//! | flags  | level   | what you see                                   |
//! |--------|---------|------------------------------------------------|
//! | (none) | `warn`  | rejected orders and dropped rows               |
//! | `-v`   | `info`  | stage results: catalog size, accepted/rejected |
//! | `-vv`  | `debug` | every accepted order with its total            |
//! | `-vvv` | `trace` | everything                                     |
//!
//! ```bash
//! RUST_LOG=order_pipeline::aggregator=debug order-pipeline --orders today.csv
//! ```
//!
//! The compact format hides module paths (`with_target(false)`) and shows
//! spans inline, e.g. `run:aggregate: Aggregation complete accepted=12 rejected=1`.

use tracing_subscriber::EnvFilter;

/// Log level used when `RUST_LOG` is not set.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn setup_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

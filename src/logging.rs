//! Tracing subscriber setup for native binaries.
//!
//! The library only emits `tracing` events; whoever runs it decides where
//! they go. Level filter comes from `RUST_LOG` (default `info`), e.g.
//! `RUST_LOG=fare_forecast=debug`.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Debug-level logging routed through the test harness. Safe to call repeatedly.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

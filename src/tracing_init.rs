//! Tracing setup for binaries and tests.
//!
//! Filtering follows `RUST_LOG`:
//! - `RUST_LOG=rustybpsk=debug` for all stage diagnostics
//! - `RUST_LOG=rustybpsk::sync=trace` to watch one subsystem

#[cfg(test)]
use once_cell::sync::Lazy;

/// Initialize tracing for tests.
///
/// Safe to call from every test; the subscriber installs once.
#[cfg(test)]
pub fn init_test_tracing() {
    static TRACING: Lazy<()> = Lazy::new(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rustybpsk=warn"));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_test_writer()
            .init();
    });

    Lazy::force(&TRACING);
}

/// Initialize tracing for binaries; call once early in main.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rustybpsk=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

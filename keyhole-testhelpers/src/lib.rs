#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the test logger and panic printer, once per process.
///
/// Call this at the top of every test. Repeated calls are free; the first
/// one wins, regardless of which test binary or thread gets there first.
/// Log verbosity follows `RUST_LOG`, defaulting to `trace` so that slot
/// bindings show up in failing-test output.
pub fn setup() {
    INIT.call_once(|| {
        color_backtrace::install();
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("trace"),
        )
        .is_test(true)
        .try_init();
    });
}

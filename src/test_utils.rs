//! Test helpers shared by unit and integration tests.
//!
//! Logging goes through `tracing`; the subscriber writes to the test
//! writer so output only shows for failing tests (or with `--nocapture`).
//! `RUST_LOG` overrides the default `debug` filter.

use std::sync::Once;

#[doc(hidden)]
pub use tracing;

static INIT: Once = Once::new();

/// Installs the test tracing subscriber once per process.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// Logs the start of a test phase.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        $crate::test_utils::tracing::info!(phase = %$name, "test phase start");
    };
}

/// Logs the successful end of a test.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        $crate::test_utils::tracing::info!(test = %$name, "test complete");
    };
}

/// Asserts a condition, logging the expectation and the observed value.
///
/// ```ignore
/// ef11::assert_with_log!(gain == 5.0, "gain", 5.0, gain);
/// ```
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {{
        let ok = $cond;
        $crate::test_utils::tracing::debug!(
            check = %$msg,
            expected = ?$expected,
            actual = ?$actual,
            ok,
            "assertion"
        );
        assert!(
            ok,
            "{}: expected {:?}, got {:?}",
            $msg, $expected, $actual
        );
    }};
}

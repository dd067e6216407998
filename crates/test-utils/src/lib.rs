//! Shared helpers for ruwnch's integration tests: settings and argument
//! builders, a scripted command executor, and test-scoped tracing.

pub mod builders;
pub mod fake_executor;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for any single poll-loop test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

static TRACING: Once = Once::new();

/// Route ruwnch's logs into the test harness's captured output.
///
/// Reads `RUWNCH_LOG` (falling back to `debug`) so a failing loop test shows
/// every fingerprint and dispatch line. Safe to call from every test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env("RUWNCH_LOG")
            .unwrap_or_else(|_| EnvFilter::new("ruwnch=debug"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// Await `f`, failing the test if the loop has not returned within
/// [`TEST_TIMEOUT`]. Guards against a poll loop that never stops.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .expect("poll loop did not finish before TEST_TIMEOUT")
}

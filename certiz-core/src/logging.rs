//! Tracing setup.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install a global `fmt` subscriber at `level`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(level: Level) -> bool {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).is_ok()
}

/// Route tracing output through the test harness.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_test_writer()
        .try_init();
}

//! Shared helpers for integration tests.

#![allow(dead_code)]

use proptest::test_runner::Config as ProptestConfig;
use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Installs a test-writer `tracing` subscriber once per test binary.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .with_target(true)
            .with_ansi(false)
            .try_init();
    });
}

pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    ProptestConfig::with_cases(cases)
}

//! Shared test fixtures for the planforge workspace.
//!
//! This crate provides standardised spec fixtures and registries to
//! eliminate duplication across test suites. It is a test-only dependency —
//! never published.
//!
//! # Modules
//!
//! - [`specs`] — [`WidgetSpec`](specs::WidgetSpec) for decode assertions and
//!   [`ProbeSpec`](specs::ProbeSpec) for recording executed actions

pub mod specs;

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test tracing subscriber once per process.
///
/// Respects `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

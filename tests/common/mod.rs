//! Common test infrastructure shared across integration tests.
//!
//! # Usage
//!
//! ```ignore
//! #[path = "common/mod.rs"]
//! mod common;
//! use common::{expand, init_tracing};
//! ```

use std::sync::Once;

use stepwise::{GeneratorRegistry, RangeResult, RawValue};

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber at TRACE level, once per test binary.
#[allow(dead_code)] // Not every integration crate logs.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    });
}

/// Expands a range through a default registry and collects it.
#[allow(dead_code)]
pub fn expand(start: RawValue, end: RawValue, step: RawValue) -> RangeResult<Vec<RawValue>> {
    GeneratorRegistry::new()
        .expand(start, end, step)
        .map(Iterator::collect)
}

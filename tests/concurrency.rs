//! Sequences hold all of their state, so a shared registry can hand out
//! sequences that are advanced on different threads without coordination.

// Allow test-specific patterns that are appropriate for test code
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use std::sync::Arc;
use std::thread;

use stepwise::{AnySequence, GeneratorRegistry, RawValue};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_public_types_are_thread_safe() {
    assert_send_sync::<GeneratorRegistry>();
    assert_send_sync::<AnySequence>();
    assert_send_sync::<stepwise::AnyStep>();
}

#[test]
fn test_parallel_sequences_from_shared_registry() {
    let registry = Arc::new(GeneratorRegistry::new());

    let handles: Vec<_> = (1..=8u64)
        .map(|step| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry
                    .expand(RawValue::U64(0), RawValue::U64(1_000), RawValue::U64(step))
                    .unwrap()
                    .count()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let expected: Vec<usize> = (1..=8u64).map(|step| (1_000 / step) as usize + 1).collect();
    assert_eq!(counts, expected);
}

#[test]
fn test_sequence_moves_between_threads_mid_iteration() {
    let mut sequence = GeneratorRegistry::new()
        .expand(RawValue::I16(0), RawValue::I16(9), RawValue::I16(1))
        .unwrap();
    let head: Vec<RawValue> = sequence.by_ref().take(5).collect();

    let tail = thread::spawn(move || sequence.collect::<Vec<_>>())
        .join()
        .unwrap();

    assert_eq!(head, (0..5).map(RawValue::I16).collect::<Vec<_>>());
    assert_eq!(tail, (5..10).map(RawValue::I16).collect::<Vec<_>>());
}

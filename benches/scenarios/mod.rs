//! Real-world scenario benchmarks.
//!
//! Complete voices rendered through the engine, the way the trigger pad
//! drives them.

mod voices;

pub use voices::bench_voices;

//! Benchmarks for the synthesis loop as a worker runs it.

mod engine;

pub use engine::bench_engine;

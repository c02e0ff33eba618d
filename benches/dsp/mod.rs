//! Benchmarks for sample-level DSP.

mod resample;
mod tone;

pub use resample::bench_resample;
pub use tone::bench_tone;

pub mod circuit; // Composite traversal and cascading shutdown
pub mod config;
pub mod dsp;
pub mod io;
pub mod peripheral; // Signal-driven buzzer front end
pub mod synth; // Control channel, synthesis worker and its lifecycle

/// Fixed output sample rate of every tone generator (8-bit signed mono).
pub const SAMPLE_RATE: u32 = 80_000;
/// Sink buffer length in samples (~100ms at `SAMPLE_RATE`).
pub const SINK_BUFFER_LEN: usize = SAMPLE_RATE as usize / 10;
/// Process-wide ceiling on live synthesis threads.
pub const DEFAULT_THREAD_CAP: usize = 100;
pub const DEFAULT_FREQUENCY_HZ: i32 = 523;
pub const DEFAULT_VOLUME: f32 = 12.0;
/// Largest amplitude an 8-bit signed sample can carry.
pub const MAX_VOLUME: f32 = 127.0;

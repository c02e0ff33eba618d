//! Generator configuration.
//!
//! Everything here has a sensible default taken from the crate constants, so
//! most callers never build a `GeneratorConfig` by hand.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{io::SinkFormat, SAMPLE_RATE, SINK_BUFFER_LEN};

/// Name given to each synthesis thread
pub const THREAD_NAME: &str = "buzzer-tone";

/// Settings shared by every synthesis worker a `Launcher` spawns.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Samples per second written to the sink
    pub sample_rate: u32,
    /// Sink buffer capacity in samples
    pub buffer_len: usize,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            buffer_len: SINK_BUFFER_LEN,
        }
    }

    /// Override the sink buffer length (clamped to at least one sample)
    pub fn buffer_len(mut self, buffer_len: usize) -> Self {
        self.buffer_len = buffer_len.max(1);
        self
    }

    /// Override the sample rate (clamped to at least 1 Hz)
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate.max(1);
        self
    }

    /// Sink format requested when a worker opens its output
    pub fn sink_format(&self) -> SinkFormat {
        SinkFormat {
            sample_rate: self.sample_rate,
            buffer_len: self.buffer_len,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

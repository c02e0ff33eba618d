//! Buzzer - one tone generator driven by three input ports
//!
//! Simple model: one buzzer = one `Generator` = at most one synthesis thread.
//! Several simultaneous tones mean several buzzers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    io::{
        converter::{frequency_from_signal, volume_from_signal},
        Signal,
    },
    synth::{Generator, Launcher},
};

/// Width of the FREQ port in bits
pub const FREQ_WIDTH: u8 = 12;
/// Width of the ENABLE port in bits
pub const ENABLE_WIDTH: u8 = 1;
/// Default width of the VOL port in bits
pub const DEFAULT_VOLUME_WIDTH: u8 = 7;

/// Unit of the value on the FREQ port
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrequencyUnit {
    #[default]
    Hertz,
    /// Tenths of a hertz; the value is divided by 10 before use
    DeciHertz,
}

/// Buzzer attributes
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuzzerConfig {
    pub frequency_unit: FrequencyUnit,
    /// Bit width of the VOL port, 1-32
    pub volume_width: u8,
}

impl BuzzerConfig {
    pub fn new() -> Self {
        Self {
            frequency_unit: FrequencyUnit::Hertz,
            volume_width: DEFAULT_VOLUME_WIDTH,
        }
    }

    pub fn frequency_unit(mut self, unit: FrequencyUnit) -> Self {
        self.frequency_unit = unit;
        self
    }

    /// Set the VOL port width, clamped to 1-32 bits
    pub fn volume_width(mut self, width: u8) -> Self {
        self.volume_width = width.clamp(1, 32);
        self
    }
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Port values sampled on one simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuzzerInputs {
    pub freq: Signal,
    pub enable: Signal,
    pub vol: Signal,
}

/// A buzzer peripheral instance
#[derive(Debug, Default)]
pub struct Buzzer {
    config: BuzzerConfig,
    /// Created on the first step
    generator: Option<Generator>,
}

impl Buzzer {
    pub fn new(config: BuzzerConfig) -> Self {
        Self {
            config,
            generator: None,
        }
    }

    pub fn config(&self) -> &BuzzerConfig {
        &self.config
    }

    /// Apply changed attributes; they take effect on the next step
    pub fn set_config(&mut self, config: BuzzerConfig) {
        self.config = BuzzerConfig::new()
            .frequency_unit(config.frequency_unit)
            .volume_width(config.volume_width);
    }

    pub fn generator(&self) -> Option<&Generator> {
        self.generator.as_ref()
    }

    /// Whether a synthesis thread is currently alive for this buzzer
    pub fn is_sounding(&self) -> bool {
        self.generator.as_ref().is_some_and(Generator::is_running)
    }

    /// Evaluate one simulation step.
    ///
    /// Never fails: undefined inputs leave frequency and volume unchanged,
    /// and a generator that cannot get a thread or an audio device stays
    /// silent.
    pub fn propagate(&mut self, inputs: &BuzzerInputs, launcher: &Launcher) {
        let config = self.config;
        let generator = self.generator.get_or_insert_with(Generator::new);

        let active = inputs.enable.is_high();
        generator.set_enabled(active);

        if let Some(hz) = frequency_from_signal(inputs.freq, config.frequency_unit) {
            generator.set_frequency(hz);
        }
        if let Some(volume) = volume_from_signal(inputs.vol, config.volume_width) {
            generator.set_volume(volume);
        }

        if active && !generator.is_running() {
            let started = launcher.start(generator);
            trace!(started, "buzzer enabled");
        }
    }

    /// Silence this buzzer without waiting for its thread
    pub fn stop(&self) {
        if let Some(generator) = &self.generator {
            generator.stop();
        }
    }
}

/// A copy shares the attributes but never the generator: it builds its own
/// on its first step.
impl Clone for Buzzer {
    fn clone(&self) -> Self {
        Self::new(self.config)
    }
}

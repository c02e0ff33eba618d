use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

use crate::{DEFAULT_FREQUENCY_HZ, DEFAULT_VOLUME, MAX_VOLUME};

/// Fields shared between the controlling simulation step and a synthesis
/// worker.
///
/// `enabled` is the worker's only exit condition, so it is published with
/// release/acquire ordering. Frequency and volume are relaxed: the worker may
/// read a momentarily stale or mismatched pair, which at worst produces one
/// odd sample.
#[derive(Debug)]
pub struct ControlChannel {
    enabled: AtomicBool,
    frequency_hz: AtomicI32,
    /// f32 bit pattern
    volume: AtomicU32,
}

impl ControlChannel {
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            frequency_hz: AtomicI32::new(DEFAULT_FREQUENCY_HZ),
            volume: AtomicU32::new(DEFAULT_VOLUME.to_bits()),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Zero or negative frequencies silence the tone without stopping it
    pub fn set_frequency(&self, hz: i32) {
        self.frequency_hz.store(hz, Ordering::Relaxed);
    }

    pub fn frequency(&self) -> i32 {
        self.frequency_hz.load(Ordering::Relaxed)
    }

    /// Amplitude in 0-127. Out-of-range values are clamped, NaN is ignored.
    pub fn set_volume(&self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        let volume = volume.clamp(0.0, MAX_VOLUME);
        self.volume.store(volume.to_bits(), Ordering::Relaxed);
    }

    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Relaxed))
    }

    /// True when a sample would actually be audible
    pub fn is_audible(&self) -> bool {
        self.frequency() > 0 && self.volume() > 0.0
    }
}

impl Default for ControlChannel {
    fn default() -> Self {
        Self::new()
    }
}

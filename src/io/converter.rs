use crate::{io::signal::Signal, peripheral::FrequencyUnit, MAX_VOLUME};

/// Frequency update carried by the FREQ input, if any.
///
/// Undefined or negative values mean "keep the previous frequency".
pub fn frequency_from_signal(signal: Signal, unit: FrequencyUnit) -> Option<i32> {
    let raw = signal.to_int();
    if raw < 0 {
        return None;
    }
    let hz = match unit {
        FrequencyUnit::Hertz => raw,
        FrequencyUnit::DeciHertz => raw / 10,
    };
    Some(hz.min(i32::MAX as i64) as i32)
}

/// Map a raw VOL value of `width` bits onto the 0-127 amplitude range.
///
/// `volume = raw * 127 / (2^width - 1)`, with `raw` taken as unsigned and
/// masked to `width` bits so the result never leaves the range.
pub fn volume_from_raw(raw: u32, width: u8) -> f32 {
    let width = width.clamp(1, 32) as u32;
    let full_scale = (1u64 << width) - 1;
    let raw = raw as u64 & full_scale;
    ((raw * MAX_VOLUME as u64) as f64 / full_scale as f64) as f32
}

/// Volume update carried by the VOL input, if fully defined
pub fn volume_from_signal(signal: Signal, width: u8) -> Option<f32> {
    signal.bits().map(|raw| volume_from_raw(raw, width))
}

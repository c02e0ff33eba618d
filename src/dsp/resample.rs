//! Sample-and-hold rate conversion from the generator rate to a device rate.
//!
//! The buzzer is an 8-bit square-edged toy, so nearest-sample conversion is
//! all the fidelity it needs. What matters is that the converter pulls source
//! samples at exactly the source rate on average, because that consumption
//! rate is what paces the synthesis worker.

/// Converts i8 samples at `source_rate` to f32 frames at `target_rate`.
#[derive(Debug, Clone)]
pub struct SampleHold {
    /// Source samples consumed per output frame
    step: f64,
    /// Fractional source position carried between frames
    position: f64,
    /// Last sample pulled from the source, already scaled to [-1, 1]
    held: f32,
}

impl SampleHold {
    pub fn new(source_rate: u32, target_rate: u32) -> Self {
        Self {
            step: source_rate.max(1) as f64 / target_rate.max(1) as f64,
            position: 0.0,
            held: 0.0,
        }
    }

    /// Produce the next output frame, pulling as many source samples as the
    /// rate ratio requires.
    ///
    /// `pull` returns `None` on underrun; the output then falls to silence
    /// rather than holding a DC offset.
    pub fn next_frame(&mut self, mut pull: impl FnMut() -> Option<i8>) -> f32 {
        self.position += self.step;
        while self.position >= 1.0 {
            self.position -= 1.0;
            self.held = match pull() {
                Some(sample) => i8_to_f32(sample),
                None => 0.0,
            };
        }
        self.held
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Scale a signed 8-bit sample into [-1.0, 1.0)
#[inline]
pub fn i8_to_f32(sample: i8) -> f32 {
    sample as f32 / 128.0
}

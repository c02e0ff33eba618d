//! Table-free sine tone with phase-continuous retuning.

/*
Integer-Cycle Sine Tone
=======================

The buzzer does not keep a floating point phase accumulator. It counts
samples inside the current cycle instead:

    N = round(sample_rate / frequency)      cycle length in samples
    i = 0, 1, ..., N-1                      position inside the cycle
    sample = round(sin(2π · i / N) · volume)

At 80 kHz the rounding of N costs at most half a sample per cycle, which for
the buzzer's 12-bit frequency range (0-4095 Hz) stays under half a semitone.

Retuning Without Clicks
-----------------------

Jumping from N to N' while keeping i unchanged would move the waveform to a
different point of its cycle: a step in the output that you hear as a click.
Instead the fractional position inside the cycle is carried over:

    p  = i / N          (using the OLD cycle length)
    i' = round(N' · p)

    old cycle, N = 8:   0 1 2 [3] 4 5 6 7        p = 3/8
    new cycle, N' = 16: 0 1 2 3 4 5 [6] 7 ...    i' = round(16 · 0.375) = 6

Both positions sit at 37.5% of their cycle, so the next sample continues the
same sine from the same phase, only stepping faster or slower.
*/

use std::f64::consts::TAU;

/// Samples per waveform period, `round(sample_rate / frequency_hz)`.
///
/// Never returns less than 1 so that very high frequencies degrade to a flat
/// output instead of dividing by zero. Non-positive frequencies yield 1.
pub fn cycle_length(sample_rate: u32, frequency_hz: i32) -> usize {
    if frequency_hz <= 0 {
        return 1;
    }
    let len = (sample_rate as f64 / frequency_hz as f64).round();
    (len as usize).max(1)
}

/// Carry a cycle position over to a new cycle length, preserving phase.
///
/// The result is always a valid index into the new cycle.
pub fn rephase(index: usize, old_len: usize, new_len: usize) -> usize {
    let new_len = new_len.max(1);
    let phase = index as f64 / old_len.max(1) as f64;
    let next = (new_len as f64 * phase).round() as usize;
    if next >= new_len {
        0
    } else {
        next
    }
}

/// Sample-by-sample sine generator tracking its position inside one cycle.
#[derive(Debug, Clone)]
pub struct ToneCursor {
    sample_rate: u32,
    frequency_hz: i32,
    cycle_len: usize,
    index: usize,
}

impl ToneCursor {
    pub fn new(sample_rate: u32, frequency_hz: i32) -> Self {
        Self {
            sample_rate,
            frequency_hz,
            cycle_len: cycle_length(sample_rate, frequency_hz),
            index: 0,
        }
    }

    /// Switch to a new frequency, keeping the fractional cycle position.
    ///
    /// Non-positive frequencies are ignored here: the caller treats them as
    /// silence and the cursor keeps its last audible tuning.
    pub fn retune(&mut self, frequency_hz: i32) {
        if frequency_hz == self.frequency_hz || frequency_hz <= 0 {
            return;
        }
        let new_len = cycle_length(self.sample_rate, frequency_hz);
        self.index = rephase(self.index, self.cycle_len, new_len);
        self.cycle_len = new_len;
        self.frequency_hz = frequency_hz;
    }

    /// Compute the sample at the current position, then advance one step.
    pub fn next_sample(&mut self, volume: f32) -> i8 {
        let angle = TAU * self.index as f64 / self.cycle_len as f64;
        // f64 -> i8 casts saturate, volume is already bounded to 127
        let sample = (angle.sin() * volume as f64).round() as i8;

        self.index += 1;
        if self.index >= self.cycle_len {
            self.index = 0;
        }
        sample
    }

    /// Fill a buffer with consecutive samples at a fixed volume
    pub fn render(&mut self, out: &mut [i8], volume: f32) {
        for slot in out.iter_mut() {
            *slot = self.next_sample(volume);
        }
    }

    pub fn frequency_hz(&self) -> i32 {
        self.frequency_hz
    }

    pub fn cycle_len(&self) -> usize {
        self.cycle_len
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Fractional position inside the current cycle, in `[0, 1)`
    pub fn phase(&self) -> f64 {
        self.index as f64 / self.cycle_len as f64
    }
}

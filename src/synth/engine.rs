//! Synthesis loop run by each tone worker.

/*
Pacing
======

The loop below has no timer and never sleeps. It computes one sample, hands
it to the sink, and goes round again. The sink's `write` blocks while its
buffer is full, so in steady state the loop runs exactly as fast as the
device consumes samples. Adding a sleep here would desynchronize the loop
from the sink's real buffering.

While the tone is silent (frequency or volume at zero) nothing is written,
so nothing blocks either: the loop spins on the control fields. That costs a
core while a generator is enabled but silent, in exchange for picking up a
new frequency or volume on the very next iteration.
*/

use tracing::trace;

use crate::dsp::tone::ToneCursor;
use crate::io::{AudioSink, SinkError};

use super::control::ControlChannel;

/// Run the synthesis loop until `control` is disabled.
///
/// Returns the number of samples written, or the sink error that ended the
/// loop early.
pub fn run(
    control: &ControlChannel,
    sink: &mut dyn AudioSink,
    sample_rate: u32,
) -> Result<u64, SinkError> {
    let mut tone = ToneCursor::new(sample_rate, control.frequency());
    let mut written = 0u64;

    while control.is_enabled() {
        let frequency_hz = control.frequency();
        let volume = control.volume();
        if frequency_hz <= 0 || volume <= 0.0 {
            std::hint::spin_loop();
            continue;
        }

        if frequency_hz != tone.frequency_hz() {
            trace!(
                from = tone.frequency_hz(),
                to = frequency_hz,
                phase = tone.phase(),
                "retuning tone"
            );
            tone.retune(frequency_hz);
        }

        sink.write(tone.next_sample(volume))?;
        written += 1;
    }

    Ok(written)
}

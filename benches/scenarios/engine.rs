//! The worker loop writing a fixed number of samples into memory.
//!
//! Measures everything a real worker does per sample except waiting on the
//! device: control reads, retune checks, synthesis and the sink call.

use std::hint::black_box;
use std::sync::Arc;

use buzzer_tone::io::{AudioSink, SinkError};
use buzzer_tone::synth::{engine, ControlChannel};
use buzzer_tone::SAMPLE_RATE;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

/// Accepts `limit` samples, then disables the channel to end the loop
struct BlockSink {
    control: Arc<ControlChannel>,
    written: usize,
    limit: usize,
    last: i8,
}

impl AudioSink for BlockSink {
    fn write(&mut self, sample: i8) -> Result<(), SinkError> {
        self.last = sample;
        self.written += 1;
        if self.written >= self.limit {
            self.control.set_enabled(false);
        }
        Ok(())
    }
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let control = Arc::new(ControlChannel::new());
    control.set_frequency(523);
    control.set_volume(127.0);

    for &size in BLOCK_SIZES {
        let mut sink = BlockSink {
            control: control.clone(),
            written: 0,
            limit: size,
            last: 0,
        };

        group.bench_with_input(BenchmarkId::new("steady_523hz", size), &size, |b, _| {
            b.iter(|| {
                sink.written = 0;
                control.set_enabled(true);
                let written = engine::run(&control, &mut sink, SAMPLE_RATE);
                black_box((written.ok(), sink.last));
            })
        });
    }

    group.finish();
}

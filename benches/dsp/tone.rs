//! Benchmarks for sine cycle rendering and phase-preserving retune.

use std::hint::black_box;

use buzzer_tone::dsp::tone::ToneCursor;
use buzzer_tone::SAMPLE_RATE;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_tone(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/tone");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0i8; size];

        // Steady tone - one sin() per sample
        let mut tone = ToneCursor::new(SAMPLE_RATE, 523);
        group.bench_with_input(BenchmarkId::new("render", size), &size, |b, _| {
            b.iter(|| {
                tone.render(black_box(&mut buffer), black_box(127.0));
            })
        });

        // Retune every sample - worst case for a sweeping FREQ input
        let mut tone = ToneCursor::new(SAMPLE_RATE, 523);
        group.bench_with_input(BenchmarkId::new("retune_each_sample", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    tone.retune(black_box(400 + (i as i32 & 0xff)));
                    *out = tone.next_sample(127.0);
                }
            })
        });
    }

    group.finish();
}

//! Benchmarks for sample-and-hold conversion to common device rates.

use std::hint::black_box;

use buzzer_tone::dsp::resample::SampleHold;
use buzzer_tone::SAMPLE_RATE;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/resample");
    let source: Vec<i8> = (0..1024).map(|i| (i % 255) as i8).collect();

    for &size in BLOCK_SIZES {
        let mut frames = vec![0.0f32; size];

        for device_rate in [44_100u32, 48_000, 96_000] {
            let mut hold = SampleHold::new(SAMPLE_RATE, device_rate);
            let mut cursor = 0usize;
            let id = format!("to_{device_rate}");
            group.bench_with_input(BenchmarkId::new(id, size), &size, |b, _| {
                b.iter(|| {
                    for frame in frames.iter_mut() {
                        *frame = hold.next_frame(|| {
                            cursor = (cursor + 1) % source.len();
                            Some(source[cursor])
                        });
                    }
                    black_box(&frames);
                })
            });
        }
    }

    group.finish();
}

//! Benchmarks for state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use fx_conductor::dsp::filter::SVFilter;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // Bandpass filter (auto-wah)
        let mut filter = SVFilter::bandpass(1000.0);
        filter.set_resonance(0.85);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("bandpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Highpass filter (shelf)
        let mut filter = SVFilter::highpass(1000.0);
        filter.set_q(0.707);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("highpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Retuned every control block, as a sweeping wah does
        let mut filter = SVFilter::bandpass(200.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("bandpass_sweeping", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                for (i, chunk) in buffer.chunks_mut(16).enumerate() {
                    filter.set_cutoff(200.0 + i as f32 * 50.0);
                    filter.render(black_box(chunk));
                }
            })
        });
    }

    group.finish();
}

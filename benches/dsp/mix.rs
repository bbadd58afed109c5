//! Benchmarks for dry/wet mixing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use fx_conductor::dsp::mix;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        // Generate test signals
        let dry: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let wet: Vec<f32> = (0..size).map(|i| (i as f32 * 0.15).cos()).collect();
        let mut output = vec![0.0f32; size];

        // Separate output buffer
        group.bench_with_input(BenchmarkId::new("dry_wet", size), &size, |b, _| {
            b.iter(|| {
                mix::mix_dry_wet(
                    black_box(&dry),
                    black_box(&wet),
                    black_box(0.3),
                    black_box(&mut output),
                )
            })
        });

        // Short wet input, tail silenced
        let short_wet = &wet[..size / 2];
        group.bench_with_input(BenchmarkId::new("dry_wet_truncated", size), &size, |b, _| {
            b.iter(|| {
                mix::mix_dry_wet(
                    black_box(&dry),
                    black_box(short_wet),
                    black_box(0.3),
                    black_box(&mut output),
                )
            })
        });
    }

    group.finish();
}

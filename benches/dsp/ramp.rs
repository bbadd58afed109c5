//! Benchmarks for parameter ramps.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use fx_conductor::dsp::ramp::{ParamRange, Ramp, RampCurve};
use fx_conductor::CONTROL_BLOCK_SIZE;

use crate::BLOCK_SIZES;

pub fn bench_ramp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ramp");

    for &size in BLOCK_SIZES {
        // Per-sample stepping (worst case)
        let mut ramp = Ramp::new(0.0, ParamRange::UNIT, 48_000.0);
        group.bench_with_input(BenchmarkId::new("linear_per_sample", size), &size, |b, &size| {
            b.iter(|| {
                ramp.set_target(black_box(1.0), 0.02);
                let mut acc = 0.0;
                for _ in 0..size {
                    acc += ramp.advance(1);
                }
                black_box(acc)
            })
        });

        // Control-rate stepping, as the graph does it
        let mut ramp = Ramp::new(0.0, ParamRange::UNIT, 48_000.0).with_curve(RampCurve::SCurve);
        group.bench_with_input(BenchmarkId::new("scurve_control_rate", size), &size, |b, &size| {
            b.iter(|| {
                ramp.set_target(black_box(1.0), 0.02);
                let mut acc = 0.0;
                for _ in 0..size / CONTROL_BLOCK_SIZE {
                    acc += ramp.advance(CONTROL_BLOCK_SIZE);
                }
                black_box(acc)
            })
        });
    }

    group.finish();
}

//! Benchmarks for DSP primitives and the effect graph.
//!
//! Run with: cargo bench
//!
//! Everything here runs on the audio thread, so it must finish well inside
//! the block deadline.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (ramp, filter, mix)
//!   - scenarios/*  Full dry/wet graphs with ramps in flight

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_ramp,
    dsp::bench_filter,
    dsp::bench_mix,
    // Graph scenarios
    scenarios::bench_drywet,
);
criterion_main!(benches);

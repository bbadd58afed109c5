//! Benchmarks for low-level DSP primitives.

mod filter;
mod mix;
mod ramp;

pub use filter::bench_filter;
pub use mix::bench_mix;
pub use ramp::bench_ramp;

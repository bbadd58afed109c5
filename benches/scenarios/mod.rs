//! Graph-level benchmarks.
//!
//! These render the same player → effect → dry/wet graph a conductor builds,
//! with parameter requests arriving between blocks.

mod drywet;

pub use drywet::bench_drywet;

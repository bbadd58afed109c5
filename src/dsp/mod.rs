//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside graph nodes. They stay focused on the math so the
//! graph layer can add orchestration and the control bridge on top.

/// Peak envelope follower for level-driven effects.
pub mod follower;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Dry/wet mixing and crossfading.
pub mod mix;
/// Click-free parameter ramps.
pub mod ramp;

pub use ramp::{ParamRange, Ramp, RampCurve};

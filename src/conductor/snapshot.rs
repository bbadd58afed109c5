use std::fmt::Debug;

use crate::graph::effect::Effect;

pub type SnapshotParam<S> = <<S as EffectSnapshot>::Effect as Effect>::Param;

/// A complete set of user-facing values for one effect.
///
/// Snapshots are replaced wholesale on every edit, never patched.
pub trait EffectSnapshot: Clone + Debug + Send + 'static {
    type Effect: Effect + Default + 'static;

    /// Every ramped field with its value.
    fn params(&self) -> Vec<(SnapshotParam<Self>, f32)>;

    /// Dry/wet balance, applied without a ramp.
    fn balance(&self) -> f32;

    /// Seconds each parameter change should take.
    fn ramp_duration(&self) -> f32;
}

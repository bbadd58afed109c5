//! Realtime graph nodes.
//!
//! Graph nodes wrap the low-level DSP primitives with what a running pipeline
//! needs: block rendering, a wait-free bridge for parameter requests, and the
//! dry/wet topology. The `extensions` module adds fluent helpers so a graph
//! reads in signal-flow order.

/// Dry/wet mixer node and its shared balance control.
pub mod drywet;
/// `Effect` contract and the node that ramps its parameters.
pub mod effect;
/// Fluent combinators (`.through()`, `.dry_wet()`).
pub mod extensions;
/// Core trait shared by all graph nodes.
pub mod node;
/// Control-thread handles for ramped parameters.
pub mod params;
/// Looping buffer player used as the graph source.
pub mod player;
/// Serial chaining of two nodes.
pub mod through;

pub use drywet::{BalanceControl, DryWetMixer};
pub use effect::{Effect, EffectParam, RampedEffect};
pub use extensions::NodeExt;
pub use node::{GraphNode, RenderCtx};
pub use params::{ParamBank, RampRequest};
pub use player::{LoopPlayer, PlayerMessage};

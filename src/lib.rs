pub mod conductor; // Graph ownership and the edit entry point
pub mod dsp;
pub mod engine; // Output sinks (device, offline)
pub mod graph; // Realtime graph nodes
pub mod recipes; // Snapshot + effect pairs

pub use conductor::{Conductor, ConductorError, ConductorState, EffectConductor};
pub use engine::{AudioBackend, BackendError, EngineConfig};

pub const MAX_BLOCK_SIZE: usize = 2048;

/// Frames rendered between two parameter updates inside a block.
///
/// Effects see ramped values as one step per control block. Gain-like
/// parameters should be smoothed per sample by the effect itself.
pub const CONTROL_BLOCK_SIZE: usize = 16;

//! Graph ownership and the edit entry point.
//!
//! A conductor sits between an edit surface (a UI, a CLI, a test) and the
//! audio graph. The edit surface hands it whole snapshots; the conductor turns
//! each one into wait-free parameter requests that the graph picks up on its
//! next block.
//!
//! ```text
//!   edit surface ──snapshot──→ EffectConductor ──set_target──→ ParamBank
//!                                   │                             │
//!                                   │ start/stop            take_request
//!                                   ↓                             ↓
//!                              AudioBackend ───render───→ LoopPlayer → DryWetMixer
//! ```

mod effect;
mod error;
mod snapshot;

use crate::graph::node::GraphNode;

pub use effect::EffectConductor;
pub use error::ConductorError;
pub use snapshot::{EffectSnapshot, SnapshotParam};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConductorState {
    #[default]
    Stopped,
    Running,
}

/// Lifecycle every demo conductor exposes.
pub trait Conductor {
    /// Build a fresh graph, hand it to the backend and start playback.
    ///
    /// Only valid while stopped.
    fn start(&mut self) -> Result<(), ConductorError>;

    /// Stop the backend. Only valid while running.
    fn stop(&mut self) -> Result<(), ConductorError>;

    /// Build the node whose output is the demo's audible result.
    ///
    /// Does not touch the running graph or the conductor's state.
    fn output_node(&self) -> Box<dyn GraphNode>;

    fn state(&self) -> ConductorState;

    fn is_running(&self) -> bool {
        self.state() == ConductorState::Running
    }
}

//! Output sinks that pull blocks from a graph.
//!
//! The conductor builds the graph, a backend moves it into whatever context
//! renders audio (a device callback, or the caller of `OfflineRenderer`).
//! Nothing here shares a lock with that context.

#[cfg(feature = "cpal")]
pub mod device;
pub mod offline;

use std::error::Error as StdError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{graph::node::GraphNode, MAX_BLOCK_SIZE};

#[cfg(feature = "cpal")]
pub use device::CpalBackend;
pub use offline::{offline, OfflineBackend, OfflineRenderer};

/// Settings shared by every backend.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Preferred sample rate in Hz. Device backends fall back to the
    /// device default when it is not supported.
    pub sample_rate: f32,
    /// Output channels; the mono graph is duplicated across them.
    pub channels: u16,
    /// Largest block handed to the graph in one call.
    pub block_size: usize,
}

impl EngineConfig {
    /// `block_size` bounded to what graph scratch buffers hold.
    pub fn block_frames(&self) -> usize {
        self.block_size.clamp(1, MAX_BLOCK_SIZE)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            channels: 2,
            block_size: 512,
        }
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no default output device available")]
    NoDevice,
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),
    #[error("backend is busy with a previous graph")]
    Busy,
    #[error("{context}")]
    Device {
        context: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },
}

impl BackendError {
    pub fn device(context: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Device {
            context,
            source: Box::new(source),
        }
    }
}

/// The audio output collaborator.
pub trait AudioBackend {
    /// Move `graph` into the rendering context and start pulling blocks.
    ///
    /// On error the graph is dropped and nothing is rendering.
    fn start(&mut self, graph: Box<dyn GraphNode>) -> Result<(), BackendError>;

    /// Stop rendering and release the graph. Stopping an idle backend is a no-op.
    fn stop(&mut self);

    /// Rate the graph will be rendered at.
    fn sample_rate(&self) -> f32;
}

/// Copy a mono block into every channel of an interleaved buffer.
#[inline]
pub fn write_interleaved(block: &[f32], out: &mut [f32], channels: usize) {
    let channels = channels.max(1);
    for (frame, &sample) in out.chunks_mut(channels).zip(block) {
        frame.fill(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleave_duplicates_mono() {
        let block = [0.1, 0.2, 0.3];
        let mut out = [0.0; 6];

        write_interleaved(&block, &mut out, 2);

        assert_eq!(out, [0.1, 0.1, 0.2, 0.2, 0.3, 0.3]);
    }

    #[test]
    fn test_block_frames_bounded() {
        let mut config = EngineConfig::default();
        assert_eq!(config.block_frames(), 512);

        config.block_size = 0;
        assert_eq!(config.block_frames(), 1);

        config.block_size = MAX_BLOCK_SIZE * 4;
        assert_eq!(config.block_frames(), MAX_BLOCK_SIZE);
    }
}

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    engine::{write_interleaved, AudioBackend, BackendError, EngineConfig},
    graph::node::{GraphNode, RenderCtx},
};

// Graphs handed over but not yet picked up by the renderer.
const HANDOFF_CAPACITY: usize = 4;

/// Pull-model backend: the caller drives rendering through `OfflineRenderer`.
///
/// Used for bounces and for driving a conductor block by block in tests. The
/// graph crosses from backend to renderer over an SPSC ring, the same way it
/// would cross into a device callback.
pub struct OfflineBackend {
    tx: Producer<Box<dyn GraphNode>>,
    running: Arc<AtomicBool>,
    sample_rate: f32,
}

/// Rendering side of an `OfflineBackend`.
pub struct OfflineRenderer {
    rx: Consumer<Box<dyn GraphNode>>,
    running: Arc<AtomicBool>,
    graph: Option<Box<dyn GraphNode>>,
    ctx: RenderCtx,
    block_frames: usize,
    channels: usize,
    scratch: Vec<f32>,
}

pub fn offline(config: EngineConfig) -> (OfflineBackend, OfflineRenderer) {
    let (tx, rx) = RingBuffer::new(HANDOFF_CAPACITY);
    let running = Arc::new(AtomicBool::new(false));

    let backend = OfflineBackend {
        tx,
        running: Arc::clone(&running),
        sample_rate: config.sample_rate,
    };
    let renderer = OfflineRenderer {
        rx,
        running,
        graph: None,
        ctx: RenderCtx::new(config.sample_rate),
        block_frames: config.block_frames(),
        channels: config.channels.max(1) as usize,
        scratch: vec![0.0; config.block_frames()],
    };

    (backend, renderer)
}

impl AudioBackend for OfflineBackend {
    fn start(&mut self, graph: Box<dyn GraphNode>) -> Result<(), BackendError> {
        self.tx.push(graph).map_err(|_| BackendError::Busy)?;
        self.running.store(true, Ordering::Release);
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

impl OfflineRenderer {
    fn sync_graph(&mut self) -> bool {
        // Latest handed-over graph wins
        while let Ok(graph) = self.rx.pop() {
            self.graph = Some(graph);
        }
        if !self.running.load(Ordering::Acquire) {
            self.graph = None;
        }
        self.graph.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Seconds rendered so far.
    pub fn time(&self) -> f64 {
        self.ctx.time
    }

    /// Render mono frames into `out`. Writes silence while stopped.
    ///
    /// Returns the number of frames produced by a graph.
    pub fn render(&mut self, out: &mut [f32]) -> usize {
        if !self.sync_graph() {
            out.fill(0.0);
            return 0;
        }

        if let Some(graph) = self.graph.as_mut() {
            for block in out.chunks_mut(self.block_frames) {
                graph.render_block(block, &self.ctx);
                self.ctx.advance(block.len());
            }
        }
        out.len()
    }

    /// Render interleaved frames, mono duplicated to every channel.
    pub fn render_interleaved(&mut self, out: &mut [f32]) -> usize {
        let channels = self.channels;
        if !self.sync_graph() {
            out.fill(0.0);
            return 0;
        }

        let mut scratch = std::mem::take(&mut self.scratch);
        let mut frames = 0;
        for frame_block in out.chunks_mut(self.block_frames * channels) {
            let n = frame_block.len() / channels;
            let block = &mut scratch[..n];
            self.render(block);
            write_interleaved(block, frame_block, channels);
            frames += n;
        }
        self.scratch = scratch;
        // Trailing partial frame
        out[frames * channels..].fill(0.0);
        frames
    }

    /// Render `frames` mono frames into a new buffer.
    pub fn render_frames(&mut self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        self.render(&mut out);
        out
    }

    /// Render `seconds` worth of mono audio into a new buffer.
    pub fn render_seconds(&mut self, seconds: f64) -> Vec<f32> {
        let frames = (seconds * self.ctx.sample_rate as f64).round() as usize;
        self.render_frames(frames)
    }
}

/// Context passed to graph nodes during rendering
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - time: Playback time of the first frame of the block, in seconds
pub struct RenderCtx {
    pub sample_rate: f32,
    pub time: f64,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            time: 0.0,
        }
    }

    /// Move the clock past a rendered block.
    pub fn advance(&mut self, frames: usize) {
        self.time += frames as f64 / self.sample_rate as f64;
    }
}

/// Core trait for audio processing graph nodes
///
/// Sources overwrite `out`; effects process `out` in place.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Clear internal signal state (filter memories, playback position).
    ///
    /// Default implementation does nothing (stateless nodes).
    fn reset(&mut self) {
        // Default: do nothing
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Effect Chain (Through)
=============================

Through runs two in-place nodes one after the other, so an effect chain of any
length is still a single node as far as the dry/wet mixer is concerned:

  [First] ──→ [Second] ──→ output

    let chain = auto_wah.through(high_shelf);

The first node writes (or transforms) the buffer, the second transforms what
the first left there.
*/

pub struct Through<A, B> {
    first: A,
    second: B,
}

impl<A, B> Through<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Through<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.first.render_block(out, ctx);
        self.second.render_block(out, ctx);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }
}

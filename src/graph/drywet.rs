use std::sync::{atomic::Ordering, Arc};

use atomic_float::AtomicF32;

use crate::{
    dsp::mix::{clamp_balance, mix_dry_wet},
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Dry/Wet Mixer Node
==================

    [Source] ──┬────────────────────── dry ──┐
               │                             (mix) ──→ output
               └──→ [Effect chain] ── wet ───┘

Unlike `Through` (serial) or a two-source crossfade, both paths share ONE
source. The source is rendered once, copied, the copy runs through the effect
chain in place, and the two are blended with `dsp::mix::mix_dry_wet`. Dry and
wet are therefore always sample-aligned and always the same length.

The balance lives in a `BalanceControl`, an atomic shared with the control
thread. It is read once at the start of each block and applied as-is: no
ramp, no smoothing.
*/

/// Shared dry/wet balance. 0.0 = dry, 1.0 = wet.
#[derive(Debug, Clone)]
pub struct BalanceControl(Arc<AtomicF32>);

impl BalanceControl {
    pub fn new(balance: f32) -> Self {
        Self(Arc::new(AtomicF32::new(clamp_balance(balance))))
    }

    /// Store a new balance, clamped to [0, 1]. Returns the stored value.
    pub fn set(&self, balance: f32) -> f32 {
        let clamped = clamp_balance(balance);
        if clamped != balance {
            tracing::debug!(requested = balance, clamped, "balance outside [0, 1]");
        }
        self.0.store(clamped, Ordering::Relaxed);
        clamped
    }

    pub fn get(&self) -> f32 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for BalanceControl {
    fn default() -> Self {
        Self::new(0.5)
    }
}

pub struct DryWetMixer<S, E> {
    source: S,
    effect: E,
    balance: BalanceControl,
    dry_buffer: Vec<f32>,
    wet_buffer: Vec<f32>,
}

impl<S, E> DryWetMixer<S, E> {
    pub fn new(source: S, effect: E, balance: BalanceControl) -> Self {
        Self {
            source,
            effect,
            balance,
            dry_buffer: vec![0.0; MAX_BLOCK_SIZE],
            wet_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn balance(&self) -> &BalanceControl {
        &self.balance
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }
}

impl<S: GraphNode, E: GraphNode> GraphNode for DryWetMixer<S, E> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let balance = self.balance.get();
        let mut sub_ctx = RenderCtx {
            sample_rate: ctx.sample_rate,
            time: ctx.time,
        };

        // Blocks larger than the scratch buffers are split
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let frames = chunk.len();
            let dry = &mut self.dry_buffer[..frames];
            let wet = &mut self.wet_buffer[..frames];

            self.source.render_block(dry, &sub_ctx);
            wet.copy_from_slice(dry);
            self.effect.render_block(wet, &sub_ctx);

            mix_dry_wet(dry, wet, balance, chunk);
            sub_ctx.advance(frames);
        }
    }

    fn reset(&mut self) {
        self.source.reset();
        self.effect.reset();
    }
}

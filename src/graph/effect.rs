use std::fmt::Debug;

use crate::{
    dsp::ramp::{ParamRange, Ramp, RampCurve},
    graph::{
        node::{GraphNode, RenderCtx},
        params::ParamBank,
    },
    CONTROL_BLOCK_SIZE,
};

/*
Ramped Effects
==============

An effect only knows how to turn input into output for a given set of
parameter values. It does not know about ramps, threads, or the edit surface:

    Effect::set_param(param, value)   "use this value from now on"
    Effect::process_block(buffer)     "process these frames in place"

`RampedEffect` wraps an effect and owns one `Ramp` per parameter. Every block:

  1. Take pending requests from the `ParamBank` and retarget the ramps
     (a retarget starts from the ramp's current value).
  2. Walk the block in control sub-blocks of CONTROL_BLOCK_SIZE frames.
     For each sub-block, advance every ramp and hand any changed value to the
     effect, then let the effect process the sub-block.
  3. Publish the ramps' current values back to the `ParamBank`.

    block (256 frames)
    ├─ 16 ─┼─ 16 ─┼─ 16 ─┼─ ... ─┼─ 16 ─┤
       ↑      ↑      ↑              ↑
    set_param at each sub-block boundary while a ramp is in flight

Sixteen frames at 48kHz is a third of a millisecond, fine enough that a ramp
sounds continuous, coarse enough that effects with expensive coefficient
updates (filters) stay cheap. Values still arrive as a staircase, one step
per sub-block. A multiplicative gain can step audibly on a fast full-range
ramp, so effects with gain-like parameters glide them per sample inside
`process_block` (see `AutoWah`'s amplitude).
*/

/// Identifies one ramped parameter of an effect.
///
/// `ALL[i].index()` must equal `i`.
pub trait EffectParam: Copy + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn index(self) -> usize;

    fn name(self) -> &'static str;

    /// Declared domain; targets are clamped into it.
    fn range(self) -> ParamRange;

    fn default_value(self) -> f32;

    fn curve(self) -> RampCurve {
        RampCurve::Linear
    }
}

/// A signal transform with ramped parameters.
pub trait Effect: Send {
    type Param: EffectParam;

    /// Receives already-ramped, in-range values.
    fn set_param(&mut self, param: Self::Param, value: f32);

    fn process_block(&mut self, buffer: &mut [f32], ctx: &RenderCtx);

    fn reset(&mut self) {}
}

/// Graph node driving an effect's parameters from a `ParamBank`.
pub struct RampedEffect<E: Effect> {
    effect: E,
    params: ParamBank<E::Param>,
    ramps: Vec<Ramp>,
    applied: Vec<f32>, // last value handed to the effect, per parameter
}

impl<E: Effect> RampedEffect<E> {
    /// Ramps start from the values currently published in `params`.
    pub fn new(mut effect: E, params: ParamBank<E::Param>, sample_rate: f32) -> Self {
        let all = E::Param::ALL;
        debug_assert!(all.iter().enumerate().all(|(i, p)| p.index() == i));

        let ramps: Vec<Ramp> = all
            .iter()
            .map(|&param| {
                Ramp::new(params.current(param), param.range(), sample_rate)
                    .with_curve(param.curve())
            })
            .collect();

        let applied = ramps.iter().map(Ramp::value).collect::<Vec<_>>();
        for (&param, &value) in all.iter().zip(&applied) {
            effect.set_param(param, value);
        }

        Self {
            effect,
            params,
            ramps,
            applied,
        }
    }

    pub fn params(&self) -> &ParamBank<E::Param> {
        &self.params
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn ramp(&self, param: E::Param) -> &Ramp {
        &self.ramps[param.index()]
    }

    fn take_requests(&mut self, sample_rate: f32) {
        for &param in E::Param::ALL {
            let ramp = &mut self.ramps[param.index()];
            ramp.set_sample_rate(sample_rate);
            if let Some(request) = self.params.take_request(param) {
                ramp.set_target(request.target, request.duration_secs);
            }
        }
    }
}

impl<E: Effect> GraphNode for RampedEffect<E> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.take_requests(ctx.sample_rate);

        let mut sub_ctx = RenderCtx {
            sample_rate: ctx.sample_rate,
            time: ctx.time,
        };

        for chunk in out.chunks_mut(CONTROL_BLOCK_SIZE) {
            for &param in E::Param::ALL {
                let i = param.index();
                let value = self.ramps[i].advance(chunk.len());
                if value != self.applied[i] {
                    self.applied[i] = value;
                    self.effect.set_param(param, value);
                }
            }

            self.effect.process_block(chunk, &sub_ctx);
            sub_ctx.advance(chunk.len());
        }

        for &param in E::Param::ALL {
            self.params.publish(param, self.ramps[param.index()].value());
        }
    }

    fn reset(&mut self) {
        self.effect.reset();
    }
}

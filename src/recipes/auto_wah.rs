#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    conductor::{EffectConductor, EffectSnapshot},
    dsp::{filter::SVFilter, follower::EnvelopeFollower, ramp::ParamRange},
    graph::{
        effect::{Effect, EffectParam},
        node::RenderCtx,
    },
    CONTROL_BLOCK_SIZE,
};

/*
Auto-Wah
========

A band-pass filter whose center frequency follows the input's loudness, so
louder notes "open" the filter:

    input ──┬──→ [envelope follower] ──→ sweep ──→ cutoff
            │                                        │
            └─────────────────────→ [band-pass SVF] ─┴──→ wet
                                                          │
    out = (input × (1 - mix) + wet × mix) × amplitude  ←──┘

Parameters (all 0..1)
---------------------

  wah        Resting position of the sweep. 0 = closed (low), 1 = open (high).
  mix        Blend of the filtered band against the unfiltered input.
  amplitude  Overall output level.

The sweep maps exponentially onto SWEEP_MIN_HZ..SWEEP_MAX_HZ so equal steps in
`wah` sound like equal steps in pitch. The cutoff is recomputed once per
control block, not per sample. `amplitude` is a plain gain, so it glides
linearly across each control block toward the latest value instead of
stepping at block edges.
*/

const SWEEP_MIN_HZ: f32 = 200.0;
const SWEEP_OCTAVES: f32 = 5.0; // up to 6.4kHz
const SENSITIVITY: f32 = 1.0;
const RESONANCE: f32 = 0.85;
const ATTACK_SECS: f32 = 0.005;
const RELEASE_SECS: f32 = 0.08;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoWahParam {
    Wah,
    Mix,
    Amplitude,
}

impl EffectParam for AutoWahParam {
    const ALL: &'static [Self] = &[Self::Wah, Self::Mix, Self::Amplitude];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::Wah => "wah",
            Self::Mix => "mix",
            Self::Amplitude => "amplitude",
        }
    }

    fn range(self) -> ParamRange {
        ParamRange::UNIT
    }

    fn default_value(self) -> f32 {
        let defaults = AutoWahData::default();
        match self {
            Self::Wah => defaults.wah,
            Self::Mix => defaults.mix,
            Self::Amplitude => defaults.amplitude,
        }
    }
}

/// Edit-surface values for the auto-wah demo.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct AutoWahData {
    pub wah: f32,
    pub mix: f32,
    pub amplitude: f32,
    pub ramp_duration: f32,
    pub balance: f32,
}

impl Default for AutoWahData {
    fn default() -> Self {
        Self {
            wah: 0.0,
            mix: 1.0,
            amplitude: 0.1,
            ramp_duration: 0.02,
            balance: 0.5,
        }
    }
}

impl EffectSnapshot for AutoWahData {
    type Effect = AutoWah;

    fn params(&self) -> Vec<(AutoWahParam, f32)> {
        vec![
            (AutoWahParam::Wah, self.wah),
            (AutoWahParam::Mix, self.mix),
            (AutoWahParam::Amplitude, self.amplitude),
        ]
    }

    fn balance(&self) -> f32 {
        self.balance
    }

    fn ramp_duration(&self) -> f32 {
        self.ramp_duration
    }
}

pub type AutoWahConductor = EffectConductor<AutoWahData>;

#[derive(Debug, Clone)]
pub struct AutoWah {
    filter: SVFilter,
    follower: EnvelopeFollower,
    wah: f32,
    mix: f32,
    amplitude: f32,
    /// Gain applied to the last rendered sample.
    applied_amplitude: f32,
    /// No block rendered since construction or reset; gain changes snap.
    fresh: bool,
}

impl AutoWah {
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = SVFilter::bandpass(SWEEP_MIN_HZ);
        filter.set_sample_rate(sample_rate);
        filter.set_resonance(RESONANCE);

        let defaults = AutoWahData::default();
        Self {
            filter,
            follower: EnvelopeFollower::new(ATTACK_SECS, RELEASE_SECS, sample_rate),
            wah: defaults.wah,
            mix: defaults.mix,
            amplitude: defaults.amplitude,
            applied_amplitude: defaults.amplitude,
            fresh: true,
        }
    }

    /// Current band-pass center frequency.
    pub fn cutoff_hz(&self) -> f32 {
        self.filter.cutoff_hz()
    }

    fn update_cutoff(&mut self) {
        let sweep = (self.wah + self.follower.level() * SENSITIVITY).clamp(0.0, 1.0);
        self.filter
            .set_cutoff(SWEEP_MIN_HZ * (sweep * SWEEP_OCTAVES).exp2());
    }
}

impl Default for AutoWah {
    fn default() -> Self {
        Self::new(48_000.0)
    }
}

impl Effect for AutoWah {
    type Param = AutoWahParam;

    fn set_param(&mut self, param: AutoWahParam, value: f32) {
        match param {
            AutoWahParam::Wah => self.wah = value,
            AutoWahParam::Mix => self.mix = value,
            AutoWahParam::Amplitude => {
                self.amplitude = value;
                if self.fresh {
                    self.applied_amplitude = value;
                }
            }
        }
    }

    fn process_block(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        self.filter.set_sample_rate(ctx.sample_rate);
        self.follower.set_sample_rate(ctx.sample_rate);

        self.fresh = false;
        let dry_amount = 1.0 - self.mix;
        for chunk in buffer.chunks_mut(CONTROL_BLOCK_SIZE) {
            self.update_cutoff();

            let start = self.applied_amplitude;
            let step = (self.amplitude - start) / chunk.len() as f32;
            for (i, sample) in chunk.iter_mut().enumerate() {
                let input = *sample;
                self.follower.next_sample(input);
                // input - notch is the band-pass normalized to unity peak gain
                let band = input - self.filter.next_sample(input).notch;
                let gain = start + step * (i + 1) as f32;
                *sample = (input * dry_amount + band * self.mix) * gain;
            }
            // Land exactly, free of accumulated rounding
            self.applied_amplitude = self.amplitude;
        }
    }

    fn reset(&mut self) {
        self.filter.reset();
        self.follower.reset();
        self.applied_amplitude = self.amplitude;
        self.fresh = true;
    }
}

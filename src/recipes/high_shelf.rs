#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    conductor::{EffectConductor, EffectSnapshot},
    dsp::{filter::SVFilter, ramp::ParamRange},
    graph::{
        effect::{Effect, EffectParam},
        node::RenderCtx,
    },
};

/*
High-Shelf EQ
=============

Boosts or cuts everything above a corner frequency by adding a scaled copy of
the high band back onto the input:

    out = input + (gain - 1) × highpass(input)

  gain = 1   flat (the high band is added zero times)
  gain > 1   boost above `center_frequency`
  gain < 1   cut above `center_frequency` (gain 0 removes the band)

`q` shapes the corner. Low values give a gentle slope, high values a bump
just above the corner.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighShelfParam {
    CenterFrequency,
    Gain,
    Q,
}

impl EffectParam for HighShelfParam {
    const ALL: &'static [Self] = &[Self::CenterFrequency, Self::Gain, Self::Q];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Self::CenterFrequency => "center_frequency",
            Self::Gain => "gain",
            Self::Q => "q",
        }
    }

    fn range(self) -> ParamRange {
        match self {
            Self::CenterFrequency => ParamRange::new(12.0, 20_000.0),
            Self::Gain => ParamRange::new(0.0, 10.0),
            Self::Q => ParamRange::new(0.0, 2.0),
        }
    }

    fn default_value(self) -> f32 {
        let defaults = HighShelfData::default();
        match self {
            Self::CenterFrequency => defaults.center_frequency,
            Self::Gain => defaults.gain,
            Self::Q => defaults.q,
        }
    }
}

/// Edit-surface values for the high-shelf demo.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct HighShelfData {
    pub center_frequency: f32,
    pub gain: f32,
    pub q: f32,
    pub ramp_duration: f32,
    pub balance: f32,
}

impl Default for HighShelfData {
    fn default() -> Self {
        Self {
            center_frequency: 1_000.0,
            gain: 1.0,
            q: 0.707,
            ramp_duration: 0.02,
            balance: 0.5,
        }
    }
}

impl EffectSnapshot for HighShelfData {
    type Effect = HighShelfEq;

    fn params(&self) -> Vec<(HighShelfParam, f32)> {
        vec![
            (HighShelfParam::CenterFrequency, self.center_frequency),
            (HighShelfParam::Gain, self.gain),
            (HighShelfParam::Q, self.q),
        ]
    }

    fn balance(&self) -> f32 {
        self.balance
    }

    fn ramp_duration(&self) -> f32 {
        self.ramp_duration
    }
}

pub type HighShelfConductor = EffectConductor<HighShelfData>;

#[derive(Debug, Clone)]
pub struct HighShelfEq {
    filter: SVFilter,
    gain: f32,
}

impl HighShelfEq {
    pub fn new(sample_rate: f32) -> Self {
        let defaults = HighShelfData::default();
        let mut filter = SVFilter::highpass(defaults.center_frequency);
        filter.set_sample_rate(sample_rate);
        filter.set_q(defaults.q);

        Self {
            filter,
            gain: defaults.gain,
        }
    }

    pub fn center_frequency(&self) -> f32 {
        self.filter.cutoff_hz()
    }
}

impl Default for HighShelfEq {
    fn default() -> Self {
        Self::new(48_000.0)
    }
}

impl Effect for HighShelfEq {
    type Param = HighShelfParam;

    fn set_param(&mut self, param: HighShelfParam, value: f32) {
        match param {
            HighShelfParam::CenterFrequency => self.filter.set_cutoff(value),
            HighShelfParam::Gain => self.gain = value,
            HighShelfParam::Q => self.filter.set_q(value),
        }
    }

    fn process_block(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        self.filter.set_sample_rate(ctx.sample_rate);

        let band_gain = self.gain - 1.0;
        for sample in buffer.iter_mut() {
            let high = self.filter.next_sample(*sample).highpass;
            *sample += band_gain * high;
        }
    }

    fn reset(&mut self) {
        self.filter.reset();
    }
}

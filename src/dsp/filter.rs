use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | passes          | rejects      |
| ----------------- | --------------- | ------------ |
| low-pass          | below cutoff    | above cutoff |
| high-pass         | above cutoff    | below cutoff |
| band-pass         | around cutoff   | both sides   |
| notch / band-stop | outside cutoff  | at cutoff    |

Topology-preserving (trapezoidal) state-variable filter. All four responses
come out of the same two integrators, so effects can pick whichever output
they need per sample (the auto-wah uses band-pass, the shelf uses high-pass).

Coefficients are cached and only recomputed when the cutoff, damping or
sample rate change, which makes it cheap to retune at control rate.
*/

const MIN_CUTOFF_HZ: f32 = 10.0;
const MIN_Q: f32 = 0.025;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

#[derive(Debug, Clone, Copy)]
pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

impl FilterOutputs {
    #[inline]
    pub fn select(&self, filter_type: FilterType) -> f32 {
        match filter_type {
            FilterType::LowPass => self.lowpass,
            FilterType::HighPass => self.highpass,
            FilterType::BandPass => self.bandpass,
            FilterType::Notch => self.notch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    g: f32,
    k: f32,
    cutoff_hz: f32,
    sample_rate: f32,
    dirty: bool,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: 0.0,
            k: 2.0,
            cutoff_hz,
            sample_rate: 48_000.0,
            dirty: true,
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz)
    }

    pub fn notch(cutoff_hz: f32) -> Self {
        Self::new(FilterType::Notch, cutoff_hz)
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        if cutoff_hz != self.cutoff_hz {
            self.cutoff_hz = cutoff_hz;
            self.dirty = true;
        }
    }

    /// 0.0 = no emphasis, approaching 1.0 = self-oscillation.
    pub fn set_resonance(&mut self, resonance: f32) {
        self.k = 2.0 - 2.0 * resonance.clamp(0.0, 0.99);
    }

    pub fn set_q(&mut self, q: f32) {
        self.k = 1.0 / q.max(MIN_Q);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate != self.sample_rate && sample_rate > 0.0 {
            self.sample_rate = sample_rate;
            self.dirty = true;
        }
    }

    #[inline]
    fn update_coefficients(&mut self) {
        if !self.dirty {
            return;
        }
        // Keep the prewarped frequency below Nyquist.
        let nyquist = self.sample_rate * 0.49;
        let cutoff = self.cutoff_hz.clamp(MIN_CUTOFF_HZ, nyquist);
        self.g = (PI * cutoff / self.sample_rate).tan();
        self.dirty = false;
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> FilterOutputs {
        self.update_coefficients();
        let (g, k) = (self.g, self.k);

        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        let filter_type = self.filter_type;
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample).select(filter_type);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

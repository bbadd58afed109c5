use crate::dsp::ramp::seconds_to_samples;

/*
Envelope Follower
=================

Tracks the loudness of a signal so another parameter can follow it. The
auto-wah uses it to open its filter when the input gets louder.

    level += coeff × (|x| - level)

with a fast coefficient while the input rises (attack) and a slow one while it
falls (release). Coefficients are one-pole: after `time` seconds the level has
covered ~63% of the distance to a steady input.
*/

#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    level: f32,
    attack_secs: f32,
    release_secs: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
}

impl EnvelopeFollower {
    pub fn new(attack_secs: f32, release_secs: f32, sample_rate: f32) -> Self {
        let mut follower = Self {
            level: 0.0,
            attack_secs,
            release_secs,
            attack_coeff: 1.0,
            release_coeff: 1.0,
            sample_rate,
        };
        follower.update_coefficients();
        follower
    }

    fn update_coefficients(&mut self) {
        self.attack_coeff = one_pole_coeff(self.attack_secs, self.sample_rate);
        self.release_coeff = one_pole_coeff(self.release_secs, self.sample_rate);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate > 0.0 && sample_rate != self.sample_rate {
            self.sample_rate = sample_rate;
            self.update_coefficients();
        }
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        let input = sample.abs();
        let coeff = if input > self.level {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.level += coeff * (input - self.level);
        self.level
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}

fn one_pole_coeff(time_secs: f32, sample_rate: f32) -> f32 {
    let samples = seconds_to_samples(time_secs, sample_rate);
    if samples == 0 {
        return 1.0; // follow instantly
    }
    1.0 - (-1.0 / samples as f32).exp()
}

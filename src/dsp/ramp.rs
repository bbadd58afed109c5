//! Click-free parameter ramps.

/*
Parameter Ramps
===============

Jumping a parameter from one value to another between two samples produces an
audible discontinuity: a "click" for gains, a "zipper" for filter cutoffs. A
ramp turns that step into a short glide so the effect never sees the jump.

Vocabulary
----------

  start         The value the ramp leaves from. Always the value the parameter
                had at the moment the ramp was requested.

  target        The value the ramp arrives at.

  length        Ramp duration, counted in samples. Durations arrive in seconds
                and are converted with the current sample rate.

  elapsed       Samples advanced since the ramp was requested, saturating at
                the length.

  curve         How the fraction elapsed/length maps onto the start → target
                distance (linear or S-shaped).


The Math
--------

    value(t) = start + (target - start) × shape(min(t / length, 1))

Time is counted in whole samples. When elapsed == length we return `target`
itself instead of evaluating the formula, so the end of a ramp is exact and
never drifts by a rounding error:

  Value
  target ┤            ●━━━━━━━━━━━━━━━  (held exactly)
         │          ╱
         │        ╱
         │      ╱
  start  ┼━━━━●
         └────┴───────┴─────────────→ samples
            request  request + length


Re-targeting Mid-Ramp
---------------------

A new request while a ramp is in flight starts from the CURRENT interpolated
value, not from the old target and not from the old start:

  Value
   0.8 ┤●╲                      ╱━━━━━  second target
       │   ╲                  ╱
   0.5 ┤     ●  ← second request starts here
       │
   0.2 ┤          (first target, never reached)
       └──────────────────────────────→

Starting from the old target would jump by (old target - current value) in one
sample, which is exactly the click we are trying to avoid.


Zero-Length Ramps
-----------------

A duration of zero (or negative, or NaN) means "jump". The target is returned
from the very next `advance` call onwards.


Domain Clamping
---------------

Every parameter declares a `ParamRange`. Targets outside the range are clamped
to the nearest bound. There is no error path here: ramps are advanced on the
audio thread, and there is nobody to hand an error to.


Curves
------

  LINEAR    shape(x) = x
            Constant rate of change. The default.

  S-CURVE   shape(x) = x² × (3 - 2x)   (smoothstep)
            Starts and ends with zero slope. Both curves are monotonic and
            pass through shape(0) = 0 and shape(1) = 1.
*/

/// Declared domain of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    min: f32,
    max: f32,
}

impl ParamRange {
    /// The unit interval [0, 1].
    pub const UNIT: ParamRange = ParamRange { min: 0.0, max: 1.0 };

    /// Bounds are reordered if given the wrong way round. A NaN bound gives
    /// [`ParamRange::UNIT`].
    pub fn new(min: f32, max: f32) -> Self {
        if min.is_nan() || max.is_nan() {
            Self::UNIT
        } else if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamp into the range. NaN maps to `min`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampCurve {
    #[default]
    Linear,
    SCurve,
}

impl RampCurve {
    /// Map the elapsed fraction `x` in [0, 1] onto the travelled fraction.
    #[inline]
    pub fn shape(self, x: f32) -> f32 {
        match self {
            RampCurve::Linear => x,
            RampCurve::SCurve => x * x * (3.0 - 2.0 * x),
        }
    }
}

/// Convert a duration in seconds into a whole number of samples.
///
/// Non-positive and NaN durations map to zero (an immediate jump).
#[inline]
pub fn seconds_to_samples(seconds: f32, sample_rate: f32) -> u32 {
    if !(seconds > 0.0) || !(sample_rate > 0.0) {
        return 0;
    }
    let samples = (seconds as f64 * sample_rate as f64).round();
    if samples >= u32::MAX as f64 {
        u32::MAX
    } else {
        samples as u32
    }
}

/// A single ramped control value.
///
/// Owned by the audio thread. The control thread never touches a `Ramp`
/// directly; requests reach it through `graph::params`.
#[derive(Debug, Clone)]
pub struct Ramp {
    start: f32,
    target: f32,
    elapsed: u32, // samples since the last request
    length: u32,  // samples, 0 = jump
    sample_rate: f32,
    range: ParamRange,
    curve: RampCurve,
}

impl Ramp {
    pub fn new(initial: f32, range: ParamRange, sample_rate: f32) -> Self {
        let initial = range.clamp(initial);
        Self {
            start: initial,
            target: initial,
            elapsed: 0,
            length: 0,
            sample_rate,
            range,
            curve: RampCurve::Linear,
        }
    }

    pub fn with_curve(mut self, curve: RampCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Schedule a glide from the current value to `value` over `duration_secs`.
    ///
    /// NaN targets are ignored.
    pub fn set_target(&mut self, value: f32, duration_secs: f32) {
        if value.is_nan() {
            return;
        }
        self.start = self.value();
        self.target = self.range.clamp(value);
        self.elapsed = 0;
        self.length = seconds_to_samples(duration_secs, self.sample_rate);
    }

    /// Re-initialise at `value` with no ramp in flight.
    pub fn jump_to(&mut self, value: f32) {
        if value.is_nan() {
            return;
        }
        let value = self.range.clamp(value);
        self.start = value;
        self.target = value;
        self.elapsed = 0;
        self.length = 0;
    }

    /// Return the value for the block starting now, then move `samples` forward.
    #[inline]
    pub fn advance(&mut self, samples: usize) -> f32 {
        let value = self.value();
        let step = u32::try_from(samples).unwrap_or(u32::MAX);
        self.elapsed = self.elapsed.saturating_add(step).min(self.length);
        value
    }

    /// Value at the current position, without advancing.
    #[inline]
    pub fn value(&self) -> f32 {
        if self.elapsed >= self.length {
            return self.target;
        }
        let t = self.elapsed as f32 / self.length as f32;
        let value = self.start + (self.target - self.start) * self.curve.shape(t);
        self.range.clamp(value)
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn start_value(&self) -> f32 {
        self.start
    }

    pub fn is_ramping(&self) -> bool {
        self.elapsed < self.length
    }

    pub fn remaining_samples(&self) -> u32 {
        self.length - self.elapsed
    }

    /// Largest change between two consecutive samples of the current ramp.
    pub fn max_step(&self) -> f32 {
        if self.length == 0 {
            return (self.target - self.start).abs();
        }
        let slope = match self.curve {
            RampCurve::Linear => 1.0,
            RampCurve::SCurve => 1.5,
        };
        (self.target - self.start).abs() * slope / self.length as f32
    }

    pub fn range(&self) -> ParamRange {
        self.range
    }

    pub fn curve(&self) -> RampCurve {
        self.curve
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Applies to ramps requested afterwards; an in-flight ramp keeps its length.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if sample_rate > 0.0 {
            self.sample_rate = sample_rate;
        }
    }
}

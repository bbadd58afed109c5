//! Wait-free bridge between the control thread and ramped parameters.

use std::{
    marker::PhantomData,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use atomic_float::AtomicF32;

use crate::graph::effect::EffectParam;

/*
Parameter Mailbox
=================

Two contexts touch a ramped parameter:

  control thread   decides WHERE the parameter should go (target, duration)
  audio thread     decides WHERE the parameter IS (the ramp state)

The ramp itself lives on the audio thread and is never shared. What crosses
the boundary is a request, and the request has to arrive whole: a target
without its duration, or a duration from a previous request, would start the
wrong ramp.

One Word Per Request
--------------------

Each parameter owns one `AtomicU64` holding the whole request:

    bits 63..32   target    (f32 bits)
    bits 31..0    duration  (f32 bits, seconds)

  control thread:  slot.store(pack(target, duration))      one atomic store
  audio thread:    slot.swap(EMPTY)                        one atomic swap

The audio thread sees either nothing or a complete request, never a mix. Neither
side waits, loops or allocates.

Latest Wins
-----------

A second request posted before the audio thread picked up the first one
overwrites it. That is the required behaviour: a newer target supersedes any
older one. Requests can never pile up, so there is no queue to overflow while
the engine is stopped.

The empty marker is u64::MAX. Its upper half is a NaN bit pattern, and NaN
targets are refused before packing, so a real request can never look empty.

Read-back
---------

After every block the audio thread publishes the current ramped value into an
`AtomicF32`. The control side reads it for display, and a rebuilt graph seeds
its ramps from it.
*/

const EMPTY: u64 = u64::MAX;

/// A pending ramp request as seen by the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampRequest {
    pub target: f32,
    pub duration_secs: f32,
}

impl RampRequest {
    #[inline]
    fn pack(self) -> u64 {
        ((self.target.to_bits() as u64) << 32) | self.duration_secs.to_bits() as u64
    }

    #[inline]
    fn unpack(word: u64) -> Self {
        Self {
            target: f32::from_bits((word >> 32) as u32),
            duration_secs: f32::from_bits(word as u32),
        }
    }
}

#[derive(Debug)]
struct ParamCell {
    request: AtomicU64,
    current: AtomicF32,
}

/// Shared handle to the ramped parameters of one effect.
///
/// Cloning is cheap; every clone talks to the same parameters.
pub struct ParamBank<P: EffectParam> {
    cells: Arc<[ParamCell]>,
    _param: PhantomData<fn() -> P>,
}

impl<P: EffectParam> Clone for ParamBank<P> {
    fn clone(&self) -> Self {
        Self {
            cells: Arc::clone(&self.cells),
            _param: PhantomData,
        }
    }
}

impl<P: EffectParam> ParamBank<P> {
    /// Every parameter starts at its declared default.
    pub fn new() -> Self {
        let mut defaults = vec![0.0; P::ALL.len()];
        for &param in P::ALL {
            defaults[param.index()] = param.range().clamp(param.default_value());
        }

        let cells = defaults
            .into_iter()
            .map(|value| ParamCell {
                request: AtomicU64::new(EMPTY),
                current: AtomicF32::new(value),
            })
            .collect();

        Self {
            cells,
            _param: PhantomData,
        }
    }

    #[inline]
    fn cell(&self, param: P) -> &ParamCell {
        &self.cells[param.index()]
    }

    /// Ask the parameter to glide to `value` over `duration_secs`.
    ///
    /// Control thread. Out-of-range values are clamped, NaN is ignored.
    /// Returns the target that was posted.
    pub fn set_target(&self, param: P, value: f32, duration_secs: f32) -> Option<f32> {
        if value.is_nan() {
            tracing::debug!(param = param.name(), "ignoring NaN target");
            return None;
        }

        let target = param.range().clamp(value);
        if target != value {
            tracing::debug!(
                param = param.name(),
                requested = value,
                clamped = target,
                "target outside parameter range"
            );
        }

        let duration_secs = if duration_secs > 0.0 { duration_secs } else { 0.0 };
        let request = RampRequest {
            target,
            duration_secs,
        };
        self.cell(param)
            .request
            .store(request.pack(), Ordering::Release);

        Some(target)
    }

    /// Move the parameter to `value` with no ramp.
    ///
    /// Also updates the published value so a graph built before the audio
    /// thread runs starts from `value`.
    pub fn jump_to(&self, param: P, value: f32) -> Option<f32> {
        let target = self.set_target(param, value, 0.0)?;
        self.cell(param).current.store(target, Ordering::Relaxed);
        Some(target)
    }

    /// Last value published by the audio thread.
    pub fn current(&self, param: P) -> f32 {
        self.cell(param).current.load(Ordering::Relaxed)
    }

    /// Whether a request is waiting for the audio thread.
    pub fn is_pending(&self, param: P) -> bool {
        self.cell(param).request.load(Ordering::Acquire) != EMPTY
    }

    /// Take the pending request, if any. Audio thread.
    #[inline]
    pub fn take_request(&self, param: P) -> Option<RampRequest> {
        let word = self.cell(param).request.swap(EMPTY, Ordering::AcqRel);
        (word != EMPTY).then(|| RampRequest::unpack(word))
    }

    /// Publish the current ramped value. Audio thread.
    #[inline]
    pub fn publish(&self, param: P, value: f32) {
        self.cell(param).current.store(value, Ordering::Relaxed);
    }
}

impl<P: EffectParam> Default for ParamBank<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dsp::ramp::ParamRange,
        graph::effect::EffectParam,
    };

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum TestParam {
        Level,
        Frequency,
    }

    impl EffectParam for TestParam {
        const ALL: &'static [Self] = &[TestParam::Level, TestParam::Frequency];

        fn index(self) -> usize {
            self as usize
        }

        fn name(self) -> &'static str {
            match self {
                TestParam::Level => "level",
                TestParam::Frequency => "frequency",
            }
        }

        fn range(self) -> ParamRange {
            match self {
                TestParam::Level => ParamRange::UNIT,
                TestParam::Frequency => ParamRange::new(20.0, 20_000.0),
            }
        }

        fn default_value(self) -> f32 {
            match self {
                TestParam::Level => 0.5,
                TestParam::Frequency => 1_000.0,
            }
        }
    }

    #[test]
    fn test_starts_at_defaults_with_nothing_pending() {
        let bank = ParamBank::<TestParam>::new();

        assert_eq!(bank.current(TestParam::Level), 0.5);
        assert_eq!(bank.current(TestParam::Frequency), 1_000.0);
        assert_eq!(bank.take_request(TestParam::Level), None);
    }

    #[test]
    fn test_take_clears_request() {
        let bank = ParamBank::<TestParam>::new();
        bank.set_target(TestParam::Level, 0.25, 0.02);

        assert!(bank.is_pending(TestParam::Level));
        assert_eq!(
            bank.take_request(TestParam::Level),
            Some(RampRequest {
                target: 0.25,
                duration_secs: 0.02
            })
        );
        assert!(!bank.is_pending(TestParam::Level));
        assert_eq!(bank.take_request(TestParam::Level), None);
    }

    #[test]
    fn test_latest_request_wins() {
        let bank = ParamBank::<TestParam>::new();
        bank.set_target(TestParam::Frequency, 200.0, 0.5);
        bank.set_target(TestParam::Frequency, 800.0, 0.01);

        let request = bank.take_request(TestParam::Frequency).unwrap();
        assert_eq!(request.target, 800.0);
        assert_eq!(request.duration_secs, 0.01);
    }

    #[test]
    fn test_parameters_are_independent() {
        let bank = ParamBank::<TestParam>::new();
        bank.set_target(TestParam::Level, 1.0, 0.0);

        assert!(!bank.is_pending(TestParam::Frequency));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let bank = ParamBank::<TestParam>::new();

        assert_eq!(bank.set_target(TestParam::Level, -3.0, 0.02), Some(0.0));
        assert_eq!(bank.take_request(TestParam::Level).unwrap().target, 0.0);
    }

    #[test]
    fn test_nan_and_negative_duration() {
        let bank = ParamBank::<TestParam>::new();

        assert_eq!(bank.set_target(TestParam::Level, f32::NAN, 0.02), None);
        assert!(!bank.is_pending(TestParam::Level));

        bank.set_target(TestParam::Level, 0.75, -1.0);
        assert_eq!(bank.take_request(TestParam::Level).unwrap().duration_secs, 0.0);

        bank.set_target(TestParam::Level, 0.75, f32::NAN);
        assert_eq!(bank.take_request(TestParam::Level).unwrap().duration_secs, 0.0);
    }

    #[test]
    fn test_jump_updates_published_value() {
        let bank = ParamBank::<TestParam>::new();
        bank.jump_to(TestParam::Level, 0.9);

        assert_eq!(bank.current(TestParam::Level), 0.9);
        assert_eq!(bank.take_request(TestParam::Level).unwrap().duration_secs, 0.0);
    }

    #[test]
    fn test_clones_share_state() {
        let control = ParamBank::<TestParam>::new();
        let audio = control.clone();

        control.set_target(TestParam::Level, 0.1, 0.0);
        assert!(audio.take_request(TestParam::Level).is_some());

        audio.publish(TestParam::Level, 0.3);
        assert_eq!(control.current(TestParam::Level), 0.3);
    }

    #[test]
    fn test_requests_never_tear_across_threads() {
        let control = ParamBank::<TestParam>::new();
        let audio = control.clone();

        let writer = std::thread::spawn(move || {
            for i in 1..20_000u32 {
                let target = 20.0 + (i % 19_000) as f32;
                control.set_target(TestParam::Frequency, target, target * 1.0e-5);
            }
        });

        let mut seen = 0;
        while !writer.is_finished() || audio.is_pending(TestParam::Frequency) {
            if let Some(request) = audio.take_request(TestParam::Frequency) {
                assert_eq!(request.duration_secs, request.target * 1.0e-5);
                seen += 1;
            }
        }
        writer.join().unwrap();
        assert!(seen > 0);
    }
}

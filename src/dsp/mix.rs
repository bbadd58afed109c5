//! Dry/wet mixing primitives.

/*
Dry/Wet Mixing
==============

An effect is rarely heard on its own. The processed ("wet") signal is blended
with the unprocessed ("dry") signal it was made from, under one control.

Vocabulary
----------

  dry           The original signal, straight from the source.

  wet           The same signal after the effect.

  balance       One control value in [0, 1] that sets the blend.
                  balance = 0.0  →  100% dry
                  balance = 0.5  →  50% dry, 50% wet
                  balance = 1.0  →  100% wet

  frame         One sample per channel. The functions here work element-wise,
                so interleaved multi-channel buffers mix per sample, per
                channel, with no knowledge of the channel count.


The Math
--------

    output = dry × (1 - balance) + wet × balance

The two weights always sum to 1.0, so mixing two full-scale signals never
exceeds full scale. Out-of-range balances are clamped, never rejected.

    balance = 0.5, dry = 1.0, wet = -1.0
    output  = 0.5 - 0.5 = 0.0        (a signal mixed with its inverse cancels)


No Balance Smoothing
--------------------

Unlike effect parameters, the balance is NOT ramped. It is read once per block
and applied as an instantaneous weight. A fast balance move can step at a block
boundary; that is accepted in exchange for a mixer with no state.


Mismatched Lengths
------------------

Dry and wet come from the same upstream source, so their lengths should always
match. If they ever differ, the shorter stream bounds the block:

    dry:  [d0 d1 d2 d3 d4 d5]
    wet:  [w0 w1 w2 w3]
    out:  [m0 m1 m2 m3  0  0]      m = mix(d, w), tail = silence

Frames present in both inputs are mixed, the rest of the output is silenced,
and the number of mixed frames is returned. The output block keeps its length.
*/

/// Blend dry and wet buffers into `out`.
///
/// Returns the number of mixed elements. Anything in `out` past that point is
/// set to silence.
#[inline]
pub fn mix_dry_wet(dry: &[f32], wet: &[f32], balance: f32, out: &mut [f32]) -> usize {
    let frames = dry.len().min(wet.len()).min(out.len());

    let balance = clamp_balance(balance);
    let dry_amount = 1.0 - balance;

    for ((o, &d), &w) in out[..frames].iter_mut().zip(dry).zip(wet) {
        *o = d * dry_amount + w * balance;
    }
    out[frames..].fill(0.0);

    frames
}

/// Clamp into [0, 1]. NaN is treated as fully dry.
#[inline]
pub fn clamp_balance(balance: f32) -> f32 {
    if balance.is_nan() {
        return 0.0;
    }
    balance.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRY: [f32; 4] = [1.0, 0.5, -0.5, -1.0];
    const WET: [f32; 4] = [0.25, -0.75, 0.125, 0.0];

    #[test]
    fn test_all_dry() {
        let mut out = [9.0; 4];
        let frames = mix_dry_wet(&DRY, &WET, 0.0, &mut out);

        assert_eq!(frames, 4);
        assert_eq!(out, DRY);
    }

    #[test]
    fn test_all_wet() {
        let mut out = [9.0; 4];
        mix_dry_wet(&DRY, &WET, 1.0, &mut out);

        assert_eq!(out, WET);
    }

    #[test]
    fn test_inverse_signals_cancel_at_half() {
        let dry = [1.0; 64];
        let wet = [-1.0; 64];
        let mut out = [9.0; 64];

        mix_dry_wet(&dry, &wet, 0.5, &mut out);

        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_balance_clamped() {
        let dry = [1.0];
        let wet = [0.0];
        let mut out = [0.0; 1];

        mix_dry_wet(&dry, &wet, 2.0, &mut out);
        assert_eq!(out[0], 0.0); // All wet

        mix_dry_wet(&dry, &wet, -1.0, &mut out);
        assert_eq!(out[0], 1.0); // All dry

        mix_dry_wet(&dry, &wet, f32::NAN, &mut out);
        assert_eq!(out[0], 1.0);
    }

    #[test]
    fn test_short_wet_truncates_and_silences_tail() {
        let dry = [1.0; 6];
        let wet = [0.0; 4];
        let mut out = [9.0; 6];

        let frames = mix_dry_wet(&dry, &wet, 0.5, &mut out);

        assert_eq!(frames, 4);
        assert_eq!(out, [0.5, 0.5, 0.5, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_short_output_bounds_block() {
        let mut out = [0.0; 2];
        let frames = mix_dry_wet(&DRY, &WET, 0.0, &mut out);

        assert_eq!(frames, 2);
        assert_eq!(out, [1.0, 0.5]);
    }

    #[test]
    fn test_interleaved_channels_mix_independently() {
        // L/R interleaved: left is dry-only content, right is wet-only content
        let dry = [1.0, 0.0, 1.0, 0.0];
        let wet = [0.0, 1.0, 0.0, 1.0];
        let mut out = [0.0; 4];

        mix_dry_wet(&dry, &wet, 0.25, &mut out);

        assert_eq!(out, [0.75, 0.25, 0.75, 0.25]);
    }
}

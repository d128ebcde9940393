//! Raised-cosine attack/release shaping for keyed tone bursts.

use core::f32::consts::PI;

/// Attack and release ramp length in seconds (5 ms).
pub const RAMP_SECS: f32 = 0.005;

/// Rising raised-cosine ramp: `0.5 × (1 − cos(π·t/T))`.
///
/// Returns 0 at `t = 0`, 1 at `t >= ramp`.
pub fn raised_cosine(t: f32, ramp: f32) -> f32 {
    if ramp <= 0.0 || t >= ramp {
        return 1.0;
    }
    if t <= 0.0 {
        return 0.0;
    }
    0.5 * (1.0 - libm::cosf(PI * t / ramp))
}

/// Envelope gain for sample `index` of a `total`-sample burst.
///
/// The first `ramp_samples` rise with a raised cosine, the last
/// `ramp_samples` fall with its mirror, and the middle is unity. Bursts
/// shorter than two ramps shrink the ramps to half the burst so attack
/// and release never overlap.
pub fn burst_gain(index: usize, total: usize, ramp_samples: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    let ramp = ramp_samples.min(total / 2);
    if ramp == 0 {
        return 1.0;
    }
    if index < ramp {
        return raised_cosine(index as f32, ramp as f32);
    }
    if index >= total - ramp {
        let from_end = (total - 1 - index) as f32;
        return raised_cosine(from_end, ramp as f32);
    }
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_starts_at_zero() {
        assert_eq!(raised_cosine(0.0, 0.005), 0.0);
    }

    #[test]
    fn ramp_ends_at_one() {
        assert_eq!(raised_cosine(0.005, 0.005), 1.0);
        assert_eq!(raised_cosine(0.010, 0.005), 1.0);
    }

    #[test]
    fn ramp_midpoint_is_half() {
        let mid = raised_cosine(0.0025, 0.005);
        assert!((mid - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ramp_is_monotonic() {
        let mut last = 0.0;
        for i in 0..=100 {
            let v = raised_cosine(i as f32 / 100.0 * 0.005, 0.005);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn burst_gain_attack_release_symmetric() {
        let total = 1000;
        let ramp = 100;
        for i in 0..ramp {
            let attack = burst_gain(i, total, ramp);
            let release = burst_gain(total - 1 - i, total, ramp);
            assert!((attack - release).abs() < 1e-6, "index {}", i);
        }
    }

    #[test]
    fn burst_gain_unity_in_middle() {
        assert_eq!(burst_gain(500, 1000, 100), 1.0);
    }

    #[test]
    fn burst_gain_edges_near_zero() {
        assert_eq!(burst_gain(0, 1000, 100), 0.0);
        assert!(burst_gain(999, 1000, 100) < 0.01);
    }

    #[test]
    fn short_burst_shrinks_ramp() {
        // Ramp longer than half the burst must not leave a gainless middle
        let g = burst_gain(5, 10, 100);
        assert!(g > 0.0);
        assert!(g <= 1.0);
    }

    #[test]
    fn zero_total_is_silent() {
        assert_eq!(burst_gain(0, 0, 100), 0.0);
    }
}

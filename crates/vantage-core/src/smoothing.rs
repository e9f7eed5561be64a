//! Interpolation helpers used by every rig
//!
//! Rates are per second. A rate multiplied by `dt` gives the fraction of the
//! remaining gap closed this tick, saturating at the full gap.

use glam::Vec3;

/// Fraction of the gap to close this tick for a rate in 1/s
#[inline]
pub fn lerp_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`
///
/// Returns 0 for an empty range.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() <= f32::EPSILON {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Move a vector towards a target by at most `max_delta`, never overshooting
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let diff = target - current;
    let distance = diff.length();

    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + diff / distance * max_delta
    }
}

use std::f64::consts::PI;

use crate::utils::constants::MAX_TURN_RATE;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Wrap a heading into [0, 360).
pub fn normalize_heading(heading: f64) -> f64 {
    let h = heading % 360.0;
    let h = if h < 0.0 { h + 360.0 } else { h };
    // -1e-17 + 360.0 rounds to exactly 360.0
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Smallest angle between two headings, in [0, 180].
pub fn heading_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// Signed turn toward `target` along the shorter arc, limited to the standard rate.
///
/// The target is rotated onto 180 so the 0/360 wrap never needs special handling.
pub fn shortest_turn(heading: f64, target: f64) -> f64 {
    let rot = normalize_heading(180.0 - target);
    let cur = normalize_heading(heading + rot);
    (180.0 - cur).clamp(-MAX_TURN_RATE, MAX_TURN_RATE)
}

/// Left turn toward `target` regardless of which arc is shorter (negative result).
pub fn left_turn(heading: f64, target: f64) -> f64 {
    -normalize_heading(heading - target).min(MAX_TURN_RATE)
}

/// Right turn toward `target` regardless of which arc is shorter.
pub fn right_turn(heading: f64, target: f64) -> f64 {
    normalize_heading(target - heading).min(MAX_TURN_RATE)
}

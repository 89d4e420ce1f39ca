//! Angle helpers shared across the crate.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to (-180, 180] degrees.
pub fn normalize_pm180(deg: f64) -> f64 {
    let r = normalize_360(deg);
    if r > 180.0 { r - 360.0 } else { r }
}

/// Forward (counter-clockwise) arc from `from` to `to`, in [0, 360).
pub fn arc_forward(from_deg: f64, to_deg: f64) -> f64 {
    normalize_360(to_deg - from_deg)
}

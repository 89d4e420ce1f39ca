//! Low-precision nutation.
//!
//! The four dominant terms of the IAU 1980 series (Meeus, ch. 22),
//! good to about 0.5″ in longitude and 0.1″ in obliquity. That is far
//! below what a 1/9° sub-division boundary can resolve.

use crate::fundamental::fundamental_arguments;

/// Nutation in longitude and obliquity, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub longitude_deg: f64,
    pub obliquity_deg: f64,
}

pub fn nutation(t: f64) -> Nutation {
    let args = fundamental_arguments(t);
    let omega = args.node.to_radians();
    // Mean longitudes of Sun and Moon (Meeus 22).
    let l_sun = (280.4665 + 36_000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481_267.8813 * t).to_radians();

    let dpsi = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps = 9.20 * omega.cos() + 0.57 * (2.0 * l_sun).cos() + 0.10 * (2.0 * l_moon).cos()
        - 0.09 * (2.0 * omega).cos();

    Nutation {
        longitude_deg: dpsi / 3600.0,
        obliquity_deg: deps / 3600.0,
    }
}

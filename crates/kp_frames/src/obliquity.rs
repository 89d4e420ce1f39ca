//! Obliquity of the ecliptic.
//!
//! Mean obliquity: IAU 2006 (Hilton et al. 2006), arcseconds.

use crate::nutation::nutation;

const EPS0_ARCSEC: f64 = 84_381.406;

/// Mean obliquity of date in degrees.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let arcsec = EPS0_ARCSEC
        + t * (-46.836769
            + t * (-0.0001831 + t * (0.00200340 + t * (-0.000000576 - t * 0.0000000434))));
    arcsec / 3600.0
}

/// True obliquity of date (mean plus nutation in obliquity) in degrees.
pub fn true_obliquity_deg(t: f64) -> f64 {
    mean_obliquity_deg(t) + nutation(t).obliquity_deg
}

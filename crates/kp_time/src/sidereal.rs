//! Earth rotation and sidereal time.
//!
//! The ascendant is a function of local sidereal time, so this is the
//! fastest-moving input of the whole horary search. UT is treated as UT1;
//! the sub-second UT1−UTC difference moves the ascendant by well under
//! the search tolerance.
//!
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use std::f64::consts::{PI, TAU};

use crate::julian::{J2000_JD, jd_to_centuries};

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Earth Rotation Angle in radians, `[0, 2π)`.
pub fn earth_rotation_angle_rad(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    // Split the integer day so the large multiplier does not eat precision.
    let frac = du.rem_euclid(1.0);
    let turns = 0.779_057_273_264_0 + frac + 0.002_737_811_911_354_48 * du;
    (TAU * turns).rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time in radians, `[0, 2π)`.
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let t = jd_to_centuries(jd_ut);
    let poly_arcsec = 0.014506
        + t * (4612.156534 + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 - t * 0.0000000368))));
    (earth_rotation_angle_rad(jd_ut) + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Local sidereal time in radians for an east-positive longitude in degrees.
pub fn local_sidereal_time_rad(jd_ut: f64, longitude_east_deg: f64) -> f64 {
    (gmst_rad(jd_ut) + longitude_east_deg.to_radians()).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_at_j2000() {
        let deg = earth_rotation_angle_rad(J2000_JD).to_degrees();
        assert!((deg - 280.46).abs() < 0.01, "ERA = {deg}");
    }

    #[test]
    fn gmst_at_j2000_midnight() {
        // 6h 39m 51.27s ≈ 99.9636°
        let deg = gmst_rad(2_451_544.5).to_degrees();
        assert!((deg - 99.9636).abs() < 0.001, "GMST = {deg}");
    }

    #[test]
    fn sidereal_day_gain() {
        // One solar day later the sidereal clock is ~0.9856° ahead.
        let d = (gmst_rad(2_460_000.5) - gmst_rad(2_459_999.5)).rem_euclid(TAU);
        assert!((d.to_degrees() - 0.9856).abs() < 0.001, "gain = {}", d.to_degrees());
    }

    #[test]
    fn lst_adds_east_longitude() {
        let jd = 2_460_345.5;
        let g = gmst_rad(jd);
        let lst = local_sidereal_time_rad(jd, 90.0);
        assert!(((lst - g).rem_euclid(TAU) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn range_is_half_open_turn() {
        for jd in [2_440_000.5, 2_451_545.0, 2_460_345.25, 2_488_069.5] {
            let g = gmst_rad(jd);
            assert!((0.0..TAU).contains(&g));
            let l = local_sidereal_time_rad(jd, -122.4);
            assert!((0.0..TAU).contains(&l));
        }
    }
}

//! Golden-value tests for the analytic ephemeris.
//!
//! Reference values: Meeus, "Astronomical Algorithms" examples 33.a and
//! 47.a, and the 2024 March equinox (2024-03-20 03:06 UTC).

use kp_ephem::{AnalyticEphemeris, Ephemeris, EphemerisError};
use kp_time::{SECONDS_PER_DAY, calendar_to_jd, delta_t_seconds, jd_ut_to_jd_tt};
use kp_vedic_base::{AyanamshaSystem, BhavaSystem, GeoLocation, Graha, arc_forward, ayanamsha_deg, normalize_pm180};

const COIMBATORE: GeoLocation = GeoLocation::new(11.0200858, 76.9831965, 0.0);

fn tropical(eph: &AnalyticEphemeris, graha: Graha, jd_ut: f64) -> f64 {
    let aya = AyanamshaSystem::Lahiri;
    let pos = eph.graha_positions(jd_ut, aya).expect("in range");
    let p = pos.iter().find(|p| p.graha == graha).expect("all nine present");
    (p.longitude_deg + ayanamsha_deg(aya, jd_ut_to_jd_tt(jd_ut))).rem_euclid(360.0)
}

/// TD moment to UT.
fn td_to_ut(jd_td: f64) -> f64 {
    jd_td - delta_t_seconds(jd_td) / SECONDS_PER_DAY
}

#[test]
fn sun_at_march_equinox_2024() {
    let eph = AnalyticEphemeris::new();
    let jd = calendar_to_jd(2024, 3, 20.0 + (3.0 + 6.0 / 60.0) / 24.0);
    let lon = normalize_pm180(tropical(&eph, Graha::Surya, jd));
    assert!(lon.abs() < 0.02, "Sun at equinox = {lon}°");
}

#[test]
fn venus_meeus_33a() {
    let eph = AnalyticEphemeris::new();
    let lon = tropical(&eph, Graha::Shukra, td_to_ut(2_448_976.5));
    assert!((lon - 313.081_02).abs() < 0.05, "Venus = {lon}°");
}

#[test]
fn moon_meeus_47a() {
    let eph = AnalyticEphemeris::new();
    let lon = tropical(&eph, Graha::Chandra, td_to_ut(2_448_724.5));
    assert!((lon - 133.167_265).abs() < 0.02, "Moon = {lon}°");
}

#[test]
fn nodes_are_opposite_and_retrograde() {
    let eph = AnalyticEphemeris::new();
    let pos = eph.graha_positions(calendar_to_jd(2024, 2, 5.0), AyanamshaSystem::KP).unwrap();
    let rahu = pos[Graha::Rahu.index() as usize];
    let ketu = pos[Graha::Ketu.index() as usize];
    assert!((arc_forward(rahu.longitude_deg, ketu.longitude_deg) - 180.0).abs() < 1e-9);
    assert!(rahu.retrograde && ketu.retrograde);
    assert!((rahu.speed_deg_per_day + 0.053).abs() < 0.002, "node speed {}", rahu.speed_deg_per_day);
}

#[test]
fn inner_planets_stay_near_the_sun() {
    let eph = AnalyticEphemeris::new();
    for day in (0..720).step_by(9) {
        let jd = calendar_to_jd(2023, 1, 1.0) + day as f64;
        let pos = eph.graha_positions(jd, AyanamshaSystem::KP).unwrap();
        let sun = pos[0].longitude_deg;
        let mercury = normalize_pm180(pos[Graha::Buddh.index() as usize].longitude_deg - sun).abs();
        let venus = normalize_pm180(pos[Graha::Shukra.index() as usize].longitude_deg - sun).abs();
        assert!(mercury < 28.5, "Mercury elongation {mercury} on day {day}");
        assert!(venus < 47.5, "Venus elongation {venus} on day {day}");
    }
}

#[test]
fn ascendant_sweeps_once_per_sidereal_day() {
    let eph = AnalyticEphemeris::new();
    let start = calendar_to_jd(2024, 2, 5.0);
    let mut prev = eph.ascendant_deg(start, &COIMBATORE, AyanamshaSystem::KP).unwrap();
    let mut total = 0.0;
    for i in 1..=360 {
        let cur = eph
            .ascendant_deg(start + i as f64 * 4.0 / 1440.0, &COIMBATORE, AyanamshaSystem::KP)
            .unwrap();
        let step = arc_forward(prev, cur);
        assert!(step > 0.0 && step < 2.0, "step {step} at sample {i}");
        total += step;
        prev = cur;
    }
    // 24 solar hours is one full turn plus ~0.99° of sidereal time.
    assert!(total > 360.5 && total < 361.5, "swept {total}°");
}

#[test]
fn placidus_first_cusp_is_ascendant() {
    let eph = AnalyticEphemeris::new();
    let jd = calendar_to_jd(2024, 2, 5.0) + 0.3;
    let asc = eph.ascendant_deg(jd, &COIMBATORE, AyanamshaSystem::KP).unwrap();
    let houses = eph.bhavas(jd, &COIMBATORE, AyanamshaSystem::KP, BhavaSystem::Placidus).unwrap();
    assert!((houses.bhavas[0].cusp_deg - asc).abs() < 1e-9);
    assert_eq!(houses.house_of(asc + 0.01), 1);
}

#[test]
fn out_of_range_moment() {
    let eph = AnalyticEphemeris::new();
    let jd = calendar_to_jd(2150, 1, 1.0);
    let err = eph.ascendant_deg(jd, &COIMBATORE, AyanamshaSystem::KP).unwrap_err();
    assert!(matches!(err, EphemerisError::OutOfRange { .. }), "{err:?}");
    assert!(eph.graha_positions(f64::NAN, AyanamshaSystem::KP).is_err());
}

#[test]
fn polar_latitude_is_degenerate() {
    let eph = AnalyticEphemeris::new();
    let pole = GeoLocation::new(89.95, 0.0, 0.0);
    let err = eph
        .ascendant_deg(calendar_to_jd(2024, 6, 1.0), &pole, AyanamshaSystem::KP)
        .unwrap_err();
    assert_eq!(err, EphemerisError::PolarDegeneracy { latitude_deg: 89.95 });
}

#[test]
fn placidus_rejected_above_polar_circle() {
    let eph = AnalyticEphemeris::new();
    let tromso_north = GeoLocation::new(70.0, 19.0, 0.0);
    let jd = calendar_to_jd(2024, 6, 1.0);
    assert!(eph.ascendant_deg(jd, &tromso_north, AyanamshaSystem::KP).is_ok());
    let err = eph.bhavas(jd, &tromso_north, AyanamshaSystem::KP, BhavaSystem::Placidus).unwrap_err();
    assert!(matches!(err, EphemerisError::Vedic(_)), "{err:?}");
    assert!(eph.bhavas(jd, &tromso_north, AyanamshaSystem::KP, BhavaSystem::Equal).is_ok());
}

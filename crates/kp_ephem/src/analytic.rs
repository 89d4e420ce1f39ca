//! Closed-form ephemeris built from the series in this crate.
//!
//! - Ascendant and houses: apparent sidereal time, true obliquity
//! - Sun and planets: Keplerian elements ([`crate::kepler`])
//! - Moon: truncated lunar theory ([`crate::moon`])
//! - Rahu/Ketu: mean lunar node
//!
//! Longitudes are referred to the equinox of date (J2000 longitude plus
//! general precession, plus nutation) before the ayanamsha is removed.

use kp_frames::{fundamental_arguments, general_precession_longitude_deg, nutation, true_obliquity_deg};
use kp_time::{calendar_to_jd, jd_to_centuries, jd_ut_to_jd_tt, local_sidereal_time_rad};
use kp_vedic_base::{
    ALL_GRAHAS, AscendantMc, AyanamshaSystem, BhavaResult, BhavaSystem, GeoLocation, Graha,
    ascendant_and_mc_deg, ayanamsha_deg, compute_bhavas, normalize_360, normalize_pm180,
};
use tracing::trace;

use crate::error::EphemerisError;
use crate::kepler::{self, OrbitalElements};
use crate::moon::moon_longitude_deg;
use crate::provider::{Ephemeris, GrahaPosition};

/// Beyond this latitude `tan φ` swamps the ascendant formula.
pub const MAX_ASCENDANT_LATITUDE_DEG: f64 = 89.9;

/// Annual aberration constant in degrees (20.4898″).
const ABERRATION_DEG: f64 = 20.4898 / 3600.0;

/// Half-width of the central difference used for speeds, in days.
const SPEED_HALF_STEP_DAYS: f64 = 0.25;

/// Analytic ephemeris valid over a configurable UT range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticEphemeris {
    min_jd: f64,
    max_jd: f64,
}

impl Default for AnalyticEphemeris {
    /// 1800-01-01 to 2100-01-01, the span the planetary elements cover.
    fn default() -> Self {
        Self {
            min_jd: calendar_to_jd(1800, 1, 1.0),
            max_jd: calendar_to_jd(2100, 1, 1.0),
        }
    }
}

/// Frame quantities shared by everything computed at one moment.
struct Epoch {
    t_tt: f64,
    obliquity_deg: f64,
    nutation_lon_deg: f64,
    ayanamsha_deg: f64,
}

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict or widen the accepted Julian Date UT range.
    pub fn with_range(min_jd: f64, max_jd: f64) -> Self {
        Self { min_jd, max_jd }
    }

    fn check_range(&self, jd_ut: f64) -> Result<(), EphemerisError> {
        if !jd_ut.is_finite() || jd_ut < self.min_jd || jd_ut > self.max_jd {
            return Err(EphemerisError::OutOfRange {
                jd_ut,
                min_jd: self.min_jd,
                max_jd: self.max_jd,
            });
        }
        Ok(())
    }

    fn epoch(&self, jd_ut: f64, ayanamsha: AyanamshaSystem) -> Result<Epoch, EphemerisError> {
        self.check_range(jd_ut)?;
        let jd_tt = jd_ut_to_jd_tt(jd_ut);
        let t_tt = jd_to_centuries(jd_tt);
        Ok(Epoch {
            t_tt,
            obliquity_deg: true_obliquity_deg(t_tt),
            nutation_lon_deg: nutation(t_tt).longitude_deg,
            ayanamsha_deg: ayanamsha_deg(ayanamsha, jd_tt),
        })
    }

    /// Tropical angles for a moment and place.
    fn angles(
        &self,
        jd_ut: f64,
        location: &GeoLocation,
        epoch: &Epoch,
    ) -> Result<AscendantMc, EphemerisError> {
        location.validate()?;
        if location.latitude_deg.abs() > MAX_ASCENDANT_LATITUDE_DEG {
            return Err(EphemerisError::PolarDegeneracy {
                latitude_deg: location.latitude_deg,
            });
        }
        // Apparent sidereal time: add the equation of the equinoxes.
        let eq_eq = epoch.nutation_lon_deg.to_radians() * epoch.obliquity_deg.to_radians().cos();
        let lst = local_sidereal_time_rad(jd_ut, location.longitude_deg) + eq_eq;
        let angles = ascendant_and_mc_deg(lst, location.latitude_deg, epoch.obliquity_deg);
        if !angles.ascendant_deg.is_finite() {
            return Err(EphemerisError::NonFinite("ascendant", jd_ut));
        }
        Ok(angles)
    }

    /// Apparent tropical longitude of a graha (nodes: mean, no nutation).
    fn tropical_longitude(graha: Graha, t_tt: f64, nutation_lon_deg: f64) -> f64 {
        let of_date = |j2000_lon: f64| j2000_lon + general_precession_longitude_deg(t_tt) + nutation_lon_deg;
        let planet = |el: &OrbitalElements| of_date(kepler::geocentric_longitude_deg(el, t_tt));
        let lon = match graha {
            Graha::Surya => {
                let (lon, r) = kepler::sun_longitude_deg(t_tt);
                of_date(lon) - ABERRATION_DEG / r
            }
            Graha::Chandra => moon_longitude_deg(t_tt) + nutation_lon_deg,
            Graha::Mangal => planet(&kepler::MARS),
            Graha::Buddh => planet(&kepler::MERCURY),
            Graha::Guru => planet(&kepler::JUPITER),
            Graha::Shukra => planet(&kepler::VENUS),
            Graha::Shani => planet(&kepler::SATURN),
            Graha::Rahu => fundamental_arguments(t_tt).node,
            Graha::Ketu => fundamental_arguments(t_tt).node + 180.0,
        };
        normalize_360(lon)
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn ascendant_deg(
        &self,
        jd_ut: f64,
        location: &GeoLocation,
        ayanamsha: AyanamshaSystem,
    ) -> Result<f64, EphemerisError> {
        let epoch = self.epoch(jd_ut, ayanamsha)?;
        let angles = self.angles(jd_ut, location, &epoch)?;
        Ok(normalize_360(angles.ascendant_deg - epoch.ayanamsha_deg))
    }

    fn bhavas(
        &self,
        jd_ut: f64,
        location: &GeoLocation,
        ayanamsha: AyanamshaSystem,
        system: BhavaSystem,
    ) -> Result<BhavaResult, EphemerisError> {
        let epoch = self.epoch(jd_ut, ayanamsha)?;
        let angles = self.angles(jd_ut, location, &epoch)?;
        Ok(compute_bhavas(
            system,
            &angles,
            location.latitude_deg,
            epoch.obliquity_deg,
            epoch.ayanamsha_deg,
        )?)
    }

    fn graha_positions(
        &self,
        jd_ut: f64,
        ayanamsha: AyanamshaSystem,
    ) -> Result<[GrahaPosition; 9], EphemerisError> {
        let epoch = self.epoch(jd_ut, ayanamsha)?;
        let dt = SPEED_HALF_STEP_DAYS / 36_525.0;
        let positions = ALL_GRAHAS.map(|graha| {
            let lon = Self::tropical_longitude(graha, epoch.t_tt, epoch.nutation_lon_deg);
            let before = Self::tropical_longitude(graha, epoch.t_tt - dt, epoch.nutation_lon_deg);
            let after = Self::tropical_longitude(graha, epoch.t_tt + dt, epoch.nutation_lon_deg);
            let speed = normalize_pm180(after - before) / (2.0 * SPEED_HALF_STEP_DAYS);
            GrahaPosition {
                graha,
                longitude_deg: normalize_360(lon - epoch.ayanamsha_deg),
                speed_deg_per_day: speed,
                retrograde: speed < 0.0,
            }
        });
        if let Some(bad) = positions.iter().find(|p| !p.longitude_deg.is_finite()) {
            return Err(EphemerisError::NonFinite(bad.graha.english_name(), jd_ut));
        }
        trace!(jd_ut, "computed graha positions");
        Ok(positions)
    }

    fn supported_range(&self) -> (f64, f64) {
        (self.min_jd, self.max_jd)
    }
}

//! The ephemeris provider interface.

use kp_vedic_base::{AyanamshaSystem, BhavaResult, BhavaSystem, GeoLocation, Graha};
use serde::Serialize;

use crate::error::EphemerisError;

/// Sidereal position of one graha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrahaPosition {
    pub graha: Graha,
    /// Sidereal ecliptic longitude in degrees, [0, 360).
    pub longitude_deg: f64,
    /// Longitude rate in degrees per day.
    pub speed_deg_per_day: f64,
    pub retrograde: bool,
}

/// Source of ascendants, houses and planetary longitudes.
///
/// All moments are Julian Dates in UT. Implementations must be
/// deterministic for fixed inputs; `Sync` implementations may be shared
/// across batch workers.
pub trait Ephemeris {
    /// Sidereal ascendant in degrees, [0, 360).
    fn ascendant_deg(
        &self,
        jd_ut: f64,
        location: &GeoLocation,
        ayanamsha: AyanamshaSystem,
    ) -> Result<f64, EphemerisError>;

    /// Sidereal house cusps.
    fn bhavas(
        &self,
        jd_ut: f64,
        location: &GeoLocation,
        ayanamsha: AyanamshaSystem,
        system: BhavaSystem,
    ) -> Result<BhavaResult, EphemerisError>;

    /// Positions of the nine grahas, in [`kp_vedic_base::ALL_GRAHAS`] order.
    fn graha_positions(
        &self,
        jd_ut: f64,
        ayanamsha: AyanamshaSystem,
    ) -> Result<[GrahaPosition; 9], EphemerisError>;

    /// Supported `[min, max]` Julian Date UT range.
    fn supported_range(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn ascendant_deg(
        &self,
        jd_ut: f64,
        location: &GeoLocation,
        ayanamsha: AyanamshaSystem,
    ) -> Result<f64, EphemerisError> {
        (**self).ascendant_deg(jd_ut, location, ayanamsha)
    }

    fn bhavas(
        &self,
        jd_ut: f64,
        location: &GeoLocation,
        ayanamsha: AyanamshaSystem,
        system: BhavaSystem,
    ) -> Result<BhavaResult, EphemerisError> {
        (**self).bhavas(jd_ut, location, ayanamsha, system)
    }

    fn graha_positions(
        &self,
        jd_ut: f64,
        ayanamsha: AyanamshaSystem,
    ) -> Result<[GrahaPosition; 9], EphemerisError> {
        (**self).graha_positions(jd_ut, ayanamsha)
    }

    fn supported_range(&self) -> (f64, f64) {
        (**self).supported_range()
    }
}

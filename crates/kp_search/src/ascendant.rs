//! The ascendant as a function of time.

use kp_ephem::Ephemeris;
use kp_vedic_base::{AyanamshaSystem, GeoLocation, normalize_360};

use crate::error::SearchError;

/// Sidereal ascendant (degrees, [0, 360)) at a Julian Date UT.
///
/// The search only assumes the value increases on average; local reversals
/// near the poles are tolerated.
pub trait AscendantFunction {
    fn evaluate(&self, jd_ut: f64) -> Result<f64, SearchError>;
}

impl<F> AscendantFunction for F
where
    F: Fn(f64) -> Result<f64, SearchError>,
{
    fn evaluate(&self, jd_ut: f64) -> Result<f64, SearchError> {
        let deg = self(jd_ut)?;
        check_finite(jd_ut, deg)
    }
}

/// An [`Ephemeris`] bound to one observer and ayanamsha.
#[derive(Debug)]
pub struct EphemerisAscendant<'a, E: ?Sized> {
    ephemeris: &'a E,
    location: GeoLocation,
    ayanamsha: AyanamshaSystem,
}

impl<'a, E: Ephemeris + ?Sized> EphemerisAscendant<'a, E> {
    pub fn new(ephemeris: &'a E, location: GeoLocation, ayanamsha: AyanamshaSystem) -> Self {
        Self {
            ephemeris,
            location,
            ayanamsha,
        }
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    pub fn ayanamsha(&self) -> AyanamshaSystem {
        self.ayanamsha
    }
}

impl<E: Ephemeris + ?Sized> AscendantFunction for EphemerisAscendant<'_, E> {
    fn evaluate(&self, jd_ut: f64) -> Result<f64, SearchError> {
        let deg = self
            .ephemeris
            .ascendant_deg(jd_ut, &self.location, self.ayanamsha)
            .map_err(|e| SearchError::ephemeris(jd_ut, &e))?;
        check_finite(jd_ut, deg)
    }
}

fn check_finite(jd_ut: f64, deg: f64) -> Result<f64, SearchError> {
    if deg.is_finite() {
        Ok(normalize_360(deg))
    } else {
        Err(SearchError::EphemerisUnavailable {
            jd_ut,
            reason: format!("non-finite ascendant {deg}"),
        })
    }
}

//! Lagna (Ascendant) and MC from local sidereal time.
//!
//! Standard spherical astronomy (Meeus, ch. 13–14). Inputs are the local
//! sidereal time (= RAMC), geographic latitude and the obliquity of date;
//! outputs are tropical ecliptic longitudes.

use std::f64::consts::TAU;

use crate::util::normalize_360;

/// Tropical Ascendant, MC and RAMC for one moment and place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AscendantMc {
    pub ascendant_deg: f64,
    pub mc_deg: f64,
    /// Right ascension of the MC, radians in [0, 2π).
    pub ramc_rad: f64,
}

/// Tropical ecliptic longitude of the rising point, degrees in [0, 360).
///
/// `λ = atan2(cos θ, −(sin θ cos ε + tan φ sin ε))`
pub fn ascendant_deg(lst_rad: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let eps = obliquity_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let asc = f64::atan2(
        lst_rad.cos(),
        -(lst_rad.sin() * eps.cos() + phi.tan() * eps.sin()),
    );
    normalize_360(asc.to_degrees())
}

/// Tropical ecliptic longitude of the culminating point, degrees in [0, 360).
pub fn mc_deg(lst_rad: f64, obliquity_deg: f64) -> f64 {
    let eps = obliquity_deg.to_radians();
    normalize_360(f64::atan2(lst_rad.sin(), lst_rad.cos() * eps.cos()).to_degrees())
}

pub fn ascendant_and_mc_deg(lst_rad: f64, latitude_deg: f64, obliquity_deg: f64) -> AscendantMc {
    AscendantMc {
        ascendant_deg: ascendant_deg(lst_rad, latitude_deg, obliquity_deg),
        mc_deg: mc_deg(lst_rad, obliquity_deg),
        ramc_rad: lst_rad.rem_euclid(TAU),
    }
}

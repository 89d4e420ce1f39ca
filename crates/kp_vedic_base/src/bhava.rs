//! Bhava (house) cusps for the horary chart.
//!
//! Placidus (the KP default), Equal, Sripati (Porphyry) and Whole Sign.
//! Quadrant cusps are computed in the tropical frame from RAMC, latitude
//! and obliquity, then shifted by the ayanamsha.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::bhava_types::{Bhava, BhavaResult, BhavaSystem};
use crate::error::VedicError;
use crate::lagna::AscendantMc;
use crate::util::{arc_forward, normalize_360};

/// Placidus semi-arcs are undefined inside the polar circles.
pub const MAX_PLACIDUS_LATITUDE_DEG: f64 = 66.5;

const PLACIDUS_MAX_ITER: usize = 50;
const PLACIDUS_CONVERGENCE_RAD: f64 = 1e-12;

/// Sidereal houses for `system`.
///
/// `angles` are tropical; `ayanamsha_deg` converts them to sidereal.
pub fn compute_bhavas(
    system: BhavaSystem,
    angles: &AscendantMc,
    latitude_deg: f64,
    obliquity_deg: f64,
    ayanamsha_deg: f64,
) -> Result<BhavaResult, VedicError> {
    let asc = normalize_360(angles.ascendant_deg - ayanamsha_deg);
    let mc = normalize_360(angles.mc_deg - ayanamsha_deg);

    let cusps = match system {
        BhavaSystem::Equal => equal_cusps(asc),
        BhavaSystem::WholeSign => equal_cusps((asc / 30.0).floor() * 30.0),
        BhavaSystem::Sripati => sripati_cusps(asc, mc),
        BhavaSystem::Placidus => {
            if latitude_deg.abs() > MAX_PLACIDUS_LATITUDE_DEG {
                return Err(VedicError::InvalidLocation(
                    "latitude exceeds 66.5 deg limit for Placidus houses",
                ));
            }
            placidus_cusps(angles, latitude_deg, obliquity_deg)
                .map(|c| normalize_360(c - ayanamsha_deg))
        }
    };

    Ok(BhavaResult {
        system,
        bhavas: build_bhavas(&cusps),
        ascendant_deg: asc,
        mc_deg: mc,
    })
}

fn build_bhavas(cusps: &[f64; 12]) -> [Bhava; 12] {
    std::array::from_fn(|i| Bhava {
        number: i as u8 + 1,
        cusp_deg: cusps[i],
        start_deg: cusps[i],
        end_deg: cusps[(i + 1) % 12],
    })
}

fn equal_cusps(start_deg: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_360(start_deg + i as f64 * 30.0))
}

/// Trisect each of the four quadrants on the ecliptic.
fn sripati_cusps(asc: f64, mc: f64) -> [f64; 12] {
    let ic = normalize_360(mc + 180.0);
    let desc = normalize_360(asc + 180.0);
    let angles = [asc, ic, desc, mc];
    let mut cusps = [0.0; 12];
    for (q, &from) in angles.iter().enumerate() {
        let to = angles[(q + 1) % 4];
        let arc = arc_forward(from, to);
        for k in 0..3 {
            cusps[q * 3 + k] = normalize_360(from + arc * k as f64 / 3.0);
        }
    }
    cusps
}

/// Tropical Placidus cusps.
fn placidus_cusps(angles: &AscendantMc, latitude_deg: f64, obliquity_deg: f64) -> [f64; 12] {
    let ramc = angles.ramc_rad;
    let phi = latitude_deg.to_radians();
    let eps = obliquity_deg.to_radians();

    // Right ascension of each intermediate cusp as a function of the
    // diurnal semi-arc of that cusp's own degree.
    let cusp = |ra_of: fn(f64, f64) -> f64| {
        let mut ra = ra_of(ramc, FRAC_PI_2);
        for _ in 0..PLACIDUS_MAX_ITER {
            let dec = (eps.tan() * ra.sin()).atan();
            let next = ra_of(ramc, diurnal_semi_arc(dec, phi));
            let done = (next - ra).abs() < PLACIDUS_CONVERGENCE_RAD;
            ra = next;
            if done {
                break;
            }
        }
        equator_to_ecliptic_deg(ra, eps)
    };

    let h11 = cusp(|ramc, dsa| ramc + dsa / 3.0);
    let h12 = cusp(|ramc, dsa| ramc + 2.0 * dsa / 3.0);
    let h2 = cusp(|ramc, dsa| ramc + PI - 2.0 * (PI - dsa) / 3.0);
    let h3 = cusp(|ramc, dsa| ramc + PI - (PI - dsa) / 3.0);

    let asc = angles.ascendant_deg;
    let mc = angles.mc_deg;
    [
        asc,
        h2,
        h3,
        normalize_360(mc + 180.0),
        normalize_360(h11 + 180.0),
        normalize_360(h12 + 180.0),
        normalize_360(asc + 180.0),
        normalize_360(h2 + 180.0),
        normalize_360(h3 + 180.0),
        mc,
        h11,
        h12,
    ]
}

fn diurnal_semi_arc(dec: f64, phi: f64) -> f64 {
    (-phi.tan() * dec.tan()).clamp(-1.0, 1.0).acos()
}

/// Ecliptic longitude of the ecliptic point with right ascension `ra`.
fn equator_to_ecliptic_deg(ra: f64, eps: f64) -> f64 {
    normalize_360(f64::atan2(ra.sin(), ra.cos() * eps.cos()).to_degrees())
}

//! Horary chart at a resolved moment: cusps and grahas with their KP lords.

use kp_ephem::Ephemeris;
use kp_vedic_base::{
    AyanamshaSystem, BhavaSystem, GeoLocation, Graha, KpLords, SubDivisionTable, kp_lords_in,
};
use serde::Serialize;

use crate::error::SearchError;

/// One house cusp and its lord chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseEntry {
    /// 1..=12
    pub number: u8,
    pub cusp_deg: f64,
    pub lords: KpLords,
}

/// One graha with its lord chain and the house it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetEntry {
    pub graha: Graha,
    pub longitude_deg: f64,
    pub speed_deg_per_day: f64,
    pub retrograde: bool,
    /// 1..=12
    pub house: u8,
    pub lords: KpLords,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoraryChart {
    pub jd_ut: f64,
    pub ayanamsha: AyanamshaSystem,
    pub bhava_system: BhavaSystem,
    /// Lord chain of the first cusp.
    pub ascendant: KpLords,
    pub mc_deg: f64,
    pub houses: Vec<HouseEntry>,
    pub planets: Vec<PlanetEntry>,
}

impl HoraryChart {
    pub fn planet(&self, graha: Graha) -> Option<&PlanetEntry> {
        self.planets.iter().find(|p| p.graha == graha)
    }

    pub fn house(&self, number: u8) -> Option<&HouseEntry> {
        self.houses.iter().find(|h| h.number == number)
    }
}

/// Cast the chart for `jd_ut`, reading lord chains from `table`.
pub fn build_chart<E: Ephemeris + ?Sized>(
    table: &SubDivisionTable,
    ephemeris: &E,
    jd_ut: f64,
    location: &GeoLocation,
    ayanamsha: AyanamshaSystem,
    bhava_system: BhavaSystem,
) -> Result<HoraryChart, SearchError> {
    let bhavas = ephemeris
        .bhavas(jd_ut, location, ayanamsha, bhava_system)
        .map_err(|e| SearchError::ephemeris(jd_ut, &e))?;
    let positions = ephemeris
        .graha_positions(jd_ut, ayanamsha)
        .map_err(|e| SearchError::ephemeris(jd_ut, &e))?;

    let houses = bhavas
        .bhavas
        .iter()
        .map(|b| HouseEntry {
            number: b.number,
            cusp_deg: b.cusp_deg,
            lords: kp_lords_in(table, b.cusp_deg),
        })
        .collect();
    let planets = positions
        .iter()
        .map(|p| PlanetEntry {
            graha: p.graha,
            longitude_deg: p.longitude_deg,
            speed_deg_per_day: p.speed_deg_per_day,
            retrograde: p.retrograde,
            house: bhavas.house_of(p.longitude_deg),
            lords: kp_lords_in(table, p.longitude_deg),
        })
        .collect();

    Ok(HoraryChart {
        jd_ut,
        ayanamsha,
        bhava_system,
        ascendant: kp_lords_in(table, bhavas.ascendant_deg),
        mc_deg: bhavas.mc_deg,
        houses,
        planets,
    })
}

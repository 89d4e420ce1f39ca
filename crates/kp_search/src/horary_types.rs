//! Request and result types for horary resolution.

use chrono::{DateTime, FixedOffset, NaiveDate};
use kp_vedic_base::{AyanamshaSystem, BhavaSystem, GeoLocation, SubDivision};
use serde::Serialize;

use crate::ascendant_search_types::{AscendantSearchConfig, SearchResult, SearchWindow};
use crate::chart::{HoraryChart, HouseEntry, PlanetEntry};
use crate::error::SearchError;

/// A querent's horary number plus the place and day of the question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRequest {
    /// 1..=249
    pub horary_number: u32,
    /// Local calendar date of the question.
    pub date: NaiveDate,
    pub location: GeoLocation,
    pub utc_offset: FixedOffset,
    pub ayanamsha: AyanamshaSystem,
    /// Overrides the default window, the 24 hours of `date` in local time.
    pub window: Option<SearchWindow>,
}

impl SearchRequest {
    /// Request with the KP ayanamsha and the local-day window.
    pub fn new(
        horary_number: u32,
        date: NaiveDate,
        location: GeoLocation,
        utc_offset: FixedOffset,
    ) -> Self {
        Self {
            horary_number,
            date,
            location,
            utc_offset,
            ayanamsha: AyanamshaSystem::KP,
            window: None,
        }
    }

    pub fn with_ayanamsha(mut self, ayanamsha: AyanamshaSystem) -> Self {
        self.ayanamsha = ayanamsha;
        self
    }

    pub fn with_window(mut self, window: SearchWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Window actually searched.
    pub fn search_window(&self) -> Result<SearchWindow, SearchError> {
        match self.window {
            Some(w) => {
                w.validate()?;
                Ok(w)
            }
            None => SearchWindow::local_day(self.date, self.utc_offset),
        }
    }
}

/// Settings shared by every request a resolver handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoraryConfig {
    pub search: AscendantSearchConfig,
    pub bhava_system: BhavaSystem,
    /// Re-locate the chart ascendant in the table and warn on a mismatch.
    pub verify_sub_lord: bool,
}

impl Default for HoraryConfig {
    fn default() -> Self {
        Self {
            search: AscendantSearchConfig::default(),
            bhava_system: BhavaSystem::Placidus,
            verify_sub_lord: true,
        }
    }
}

/// Everything known about one resolved request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoraryResolution {
    pub horary_number: u32,
    pub division: SubDivision,
    pub search: SearchResult,
    /// Matched moment in the request's civil offset.
    pub matched_time: DateTime<FixedOffset>,
    pub chart: HoraryChart,
    /// Chart ascendant lands in `division`.
    pub sub_lord_verified: bool,
}

impl HoraryResolution {
    /// The caller-facing summary.
    pub fn outcome(&self) -> HoraryOutcome {
        HoraryOutcome {
            matched_time: self.matched_time,
            ascendant_deg: self.chart.ascendant.longitude_deg,
            houses: self.chart.houses.clone(),
            planets: self.chart.planets.clone(),
        }
    }
}

impl From<HoraryResolution> for HoraryOutcome {
    fn from(r: HoraryResolution) -> Self {
        Self {
            matched_time: r.matched_time,
            ascendant_deg: r.chart.ascendant.longitude_deg,
            houses: r.chart.houses,
            planets: r.chart.planets,
        }
    }
}

/// Matched time, ascendant, houses and planets for one horary number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoraryOutcome {
    pub matched_time: DateTime<FixedOffset>,
    pub ascendant_deg: f64,
    pub houses: Vec<HouseEntry>,
    pub planets: Vec<PlanetEntry>,
}

//! Horary number → matched moment → chart.

use chrono::{FixedOffset, NaiveDate};
use kp_ephem::Ephemeris;
use kp_time::jd_ut_to_civil;
use kp_vedic_base::{AyanamshaSystem, GeoLocation, SubDivisionTable};
use tracing::{info, instrument, warn};

use crate::ascendant::EphemerisAscendant;
use crate::ascendant_search::find_time;
use crate::ascendant_search_types::{DegreeInterval, SearchWindow};
use crate::chart::build_chart;
use crate::error::{ResolveError, ResolveStage};
use crate::horary_types::{HoraryConfig, HoraryOutcome, HoraryResolution, SearchRequest};

/// Resolves horary numbers against one table and one ephemeris.
///
/// Holds only shared references and plain configuration, so a resolver
/// over a `Sync` ephemeris can be used from several threads at once.
#[derive(Debug)]
pub struct HoraryResolver<'a, E: ?Sized> {
    table: &'a SubDivisionTable,
    ephemeris: &'a E,
    config: HoraryConfig,
}

impl<'a, E: Ephemeris + ?Sized> HoraryResolver<'a, E> {
    pub fn new(table: &'a SubDivisionTable, ephemeris: &'a E, config: HoraryConfig) -> Self {
        Self {
            table,
            ephemeris,
            config,
        }
    }

    /// Resolver over the built-in KP table with default settings.
    pub fn kp(ephemeris: &'a E) -> Self {
        Self::new(SubDivisionTable::kp(), ephemeris, HoraryConfig::default())
    }

    pub fn table(&self) -> &'a SubDivisionTable {
        self.table
    }

    pub fn ephemeris(&self) -> &'a E {
        self.ephemeris
    }

    pub fn config(&self) -> &HoraryConfig {
        &self.config
    }

    /// Find the first moment of the request window at which the ascendant
    /// lies in the request's division, and cast the chart for it.
    #[instrument(level = "debug", skip(self, request), fields(horary = request.horary_number))]
    pub fn resolve(&self, request: &SearchRequest) -> Result<HoraryResolution, ResolveError> {
        let n = request.horary_number;
        let division = *self
            .table
            .lookup(n)
            .map_err(|e| ResolveError::at(n, ResolveStage::Lookup)(e.into()))?;

        request
            .location
            .validate()
            .map_err(|e| ResolveError::at(n, ResolveStage::Request)(e.into()))?;
        let window = request
            .search_window()
            .map_err(ResolveError::at(n, ResolveStage::Request))?;

        let ascendant = EphemerisAscendant::new(self.ephemeris, request.location, request.ayanamsha);
        let search = find_time(
            &ascendant,
            DegreeInterval::from(&division),
            window,
            &self.config.search,
        )
        .map_err(ResolveError::at(n, ResolveStage::Search))?;

        let matched_time = jd_ut_to_civil(search.jd_ut, request.utc_offset)
            .map_err(|e| ResolveError::at(n, ResolveStage::Chart)(e.into()))?;
        let chart = build_chart(
            self.table,
            self.ephemeris,
            search.jd_ut,
            &request.location,
            request.ayanamsha,
            self.config.bhava_system,
        )
        .map_err(ResolveError::at(n, ResolveStage::Chart))?;

        let located = self.table.locate(chart.ascendant.longitude_deg);
        let sub_lord_verified = located.horary_number == division.horary_number;
        if self.config.verify_sub_lord && !sub_lord_verified {
            warn!(
                expected = division.horary_number,
                found = located.horary_number,
                ascendant_deg = chart.ascendant.longitude_deg,
                "chart ascendant falls outside the requested division"
            );
        }

        info!(
            matched = %matched_time,
            ascendant_deg = search.achieved_ascendant_deg,
            sub_lord = %division.sub_lord,
            converged = search.converged,
            "resolved horary number"
        );

        Ok(HoraryResolution {
            horary_number: n,
            division,
            search,
            matched_time,
            chart,
            sub_lord_verified,
        })
    }
}

/// Resolve one horary number with the built-in KP table and default
/// search settings.
///
/// `time_window` defaults to the 24 hours of `date` at `utc_offset`.
pub fn resolve_horary<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    horary_number: u32,
    date: NaiveDate,
    time_window: Option<SearchWindow>,
    location: GeoLocation,
    utc_offset: FixedOffset,
    ayanamsha: AyanamshaSystem,
) -> Result<HoraryOutcome, ResolveError> {
    let request = SearchRequest {
        horary_number,
        date,
        location,
        utc_offset,
        ayanamsha,
        window: time_window,
    };
    HoraryResolver::kp(ephemeris)
        .resolve(&request)
        .map(HoraryOutcome::from)
}

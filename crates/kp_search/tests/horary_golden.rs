//! End-to-end horary resolution against the built-in analytic ephemeris.
//!
//! Reference: horary 34 (Taurus 17°46′40″–19°40′00″, Venus / Moon / Mercury)
//! asked at Coimbatore on 2024-02-05 rises shortly before 13:50 IST.

use chrono::{FixedOffset, NaiveDate, Timelike};
use kp_ephem::AnalyticEphemeris;
use kp_search::{
    HoraryConfig, HoraryResolver, ResolutionCache, ResolveStage, SearchError, SearchRequest,
    SearchWindow, resolve_batch, resolve_horary,
};
use kp_vedic_base::{
    AyanamshaSystem, BhavaSystem, GeoLocation, Graha, SubDivision, SubDivisionTable, normalize_360,
};

const COIMBATORE: GeoLocation = GeoLocation::new(11.020_085_8, 76.983_196_5, 0.0);

fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
}

fn feb5() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()
}

fn request(n: u32) -> SearchRequest {
    SearchRequest::new(n, feb5(), COIMBATORE, ist())
}

#[test]
fn horary_34_coimbatore() {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    let r = resolver.resolve(&request(34)).unwrap();

    assert_eq!(r.division.sign_lord, Graha::Shukra);
    assert_eq!(r.division.nakshatra_lord, Graha::Chandra);
    assert_eq!(r.division.sub_lord, Graha::Buddh);
    assert!(r.search.converged);
    assert!(r.sub_lord_verified);

    let asc = r.chart.ascendant.longitude_deg;
    assert!((47.777_777..49.666_667).contains(&asc), "asc = {asc}");
    assert_eq!(r.chart.ascendant.sub_lord, Graha::Buddh);
    assert_eq!(r.chart.ascendant.horary_number, 34);

    let t = r.matched_time;
    assert_eq!(t.offset().local_minus_utc(), 19_800);
    assert_eq!(t.date_naive(), feb5());
    let minutes = f64::from(t.hour() * 60 + t.minute()) + f64::from(t.second()) / 60.0;
    let expected = 13.0 * 60.0 + 49.6;
    assert!((minutes - expected).abs() < 5.0, "matched {t}, expected ~13:49:36");
}

#[test]
fn resolve_horary_outcome() {
    let eph = AnalyticEphemeris::new();
    let out = resolve_horary(&eph, 34, feb5(), None, COIMBATORE, ist(), AyanamshaSystem::KP).unwrap();
    assert_eq!(out.houses.len(), 12);
    assert_eq!(out.planets.len(), 9);
    assert!((out.houses[0].cusp_deg - out.ascendant_deg).abs() < 1e-9);
    assert_eq!(out.matched_time.offset(), &ist());
    let json = serde_json::to_string(&out).unwrap();
    assert!(json.contains("\"matched_time\""));
}

#[test]
fn all_numbers_land_in_their_division() {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    let requests: Vec<_> = (1..=249).map(request).collect();
    let results = resolve_batch(&resolver, &requests, 4);
    assert_eq!(results.len(), 249);

    let table = SubDivisionTable::kp();
    let window = request(1).search_window().unwrap();
    for (n, result) in (1u32..).zip(&results) {
        let r = result.as_ref().unwrap_or_else(|e| panic!("horary {n}: {e}"));
        assert_eq!(r.horary_number, n, "batch keeps request order");
        assert!(r.search.converged, "horary {n} did not converge");
        assert!(window.contains(r.search.jd_ut));
        let located = table.locate(r.search.achieved_ascendant_deg);
        assert_eq!(u32::from(located.horary_number), n);
    }
}

#[test]
fn batch_matches_sequential() {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    let requests: Vec<_> = [1, 34, 100, 249, 0, 7].into_iter().map(request).collect();
    let parallel = resolve_batch(&resolver, &requests, 3);
    let sequential: Vec<_> = requests.iter().map(|r| resolver.resolve(r)).collect();
    assert_eq!(parallel, sequential);
    assert!(parallel[4].is_err(), "horary 0 fails without stopping the batch");
}

#[test]
fn out_of_range_numbers() {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    for n in [0, 250, 1000] {
        let err = resolver.resolve(&request(n)).unwrap_err();
        assert_eq!(err.stage, ResolveStage::Lookup);
        assert_eq!(err.horary_number, n);
        assert!(err.source.is_out_of_range());
    }
}

#[test]
fn invalid_location_rejected() {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    let mut req = request(34);
    req.location.latitude_deg = 95.0;
    let err = resolver.resolve(&req).unwrap_err();
    assert_eq!(err.stage, ResolveStage::Request);
}

#[test]
fn polar_location_is_unavailable() {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    let mut req = request(34);
    req.location.latitude_deg = 89.95;
    let err = resolver.resolve(&req).unwrap_err();
    assert_eq!(err.stage, ResolveStage::Search);
    assert!(matches!(err.source, SearchError::EphemerisUnavailable { .. }));
}

#[test]
fn placidus_fails_above_polar_circle_equal_works() {
    let eph = AnalyticEphemeris::new();
    let mut req = request(120);
    req.location = GeoLocation::new(69.65, 18.96, 0.0);
    req.utc_offset = FixedOffset::east_opt(3600).unwrap();

    let err = HoraryResolver::kp(&eph).resolve(&req).unwrap_err();
    assert_eq!(err.stage, ResolveStage::Chart);

    let config = HoraryConfig {
        bhava_system: BhavaSystem::Equal,
        ..HoraryConfig::default()
    };
    let r = HoraryResolver::new(SubDivisionTable::kp(), &eph, config)
        .resolve(&req)
        .unwrap();
    assert_eq!(r.chart.bhava_system, BhavaSystem::Equal);
    assert!(r.sub_lord_verified, "asc = {}", r.chart.ascendant.longitude_deg);
}

#[test]
fn window_without_crossing() {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    let found = resolver.resolve(&request(34)).unwrap().search.jd_ut;
    let after = SearchWindow::new(found + 0.02, found + 0.1).unwrap();
    let err = resolver.resolve(&request(34).with_window(after)).unwrap_err();
    assert_eq!(err.stage, ResolveStage::Search);
    assert!(matches!(err.source, SearchError::NoSolutionFound { .. }));
}

#[test]
fn deterministic_resolution() {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    let a = resolver.resolve(&request(171)).unwrap();
    let b = resolver.resolve(&request(171)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn ayanamsha_changes_moment() {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    let kp = resolver.resolve(&request(34)).unwrap();
    let fagan = resolver
        .resolve(&request(34).with_ayanamsha(AyanamshaSystem::FaganBradley))
        .unwrap();
    // Fagan-Bradley is ~0.9° larger, so the same sidereal arc rises later
    assert!(fagan.search.jd_ut > kp.search.jd_ut);
    assert!(fagan.search.jd_ut - kp.search.jd_ut < 0.01);
}

#[test]
fn cache_reuses_resolution() {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    let mut cache = ResolutionCache::new();

    let first = cache.get_or_resolve(&resolver, &request(34)).unwrap().clone();
    let again = cache.get_or_resolve(&resolver, &request(34)).unwrap().clone();
    assert_eq!(first, again);
    assert_eq!((cache.hits(), cache.misses()), (1, 1));

    assert!(cache.get_or_resolve(&resolver, &request(0)).is_err());
    assert_eq!(cache.len(), 1, "failures are not cached");
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn chart_lords_follow_resolver_table() {
    // Every boundary moved back by 1°: the chart must be numbered and
    // lorded by this table, not the built-in one.
    let shifted: Vec<SubDivision> = SubDivisionTable::kp()
        .iter()
        .map(|d| SubDivision {
            start_deg: normalize_360(d.start_deg - 1.0),
            end_deg: normalize_360(d.end_deg - 1.0),
            ..*d
        })
        .collect();
    let table = SubDivisionTable::from_divisions(shifted).unwrap();
    let eph = AnalyticEphemeris::new();
    let r = HoraryResolver::new(&table, &eph, HoraryConfig::default())
        .resolve(&request(34))
        .unwrap();

    let asc = &r.chart.ascendant;
    assert!(r.sub_lord_verified);
    assert_eq!(asc.horary_number, 34);
    assert_eq!(asc.sub_lord, table.lookup(34).unwrap().sub_lord);
    for h in &r.chart.houses {
        assert_eq!(h.lords.horary_number, table.locate(h.cusp_deg).horary_number);
    }
}

use chrono::{FixedOffset, NaiveDate};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kp_ephem::AnalyticEphemeris;
use kp_search::{
    AscendantSearchConfig, DegreeInterval, EphemerisAscendant, HoraryResolver, SearchRequest,
    SearchWindow, find_time, resolve_batch,
};
use kp_vedic_base::{AyanamshaSystem, GeoLocation};

const CHENNAI: GeoLocation = GeoLocation::new(13.0827, 80.2707, 0.0);

fn request(n: u32) -> SearchRequest {
    SearchRequest::new(
        n,
        NaiveDate::from_ymd_opt(2024, 2, 5).expect("valid date"),
        CHENNAI,
        FixedOffset::east_opt(19_800).expect("valid offset"),
    )
}

fn find_time_bench(c: &mut Criterion) {
    let eph = AnalyticEphemeris::new();
    let asc = EphemerisAscendant::new(&eph, CHENNAI, AyanamshaSystem::KP);
    let target = DegreeInterval::new(47.777_777, 49.666_667).expect("valid interval");
    let window = SearchWindow::new(2_460_345.27, 2_460_346.27).expect("valid window");
    let config = AscendantSearchConfig::default();

    let mut group = c.benchmark_group("ascendant_search");
    group.bench_function("find_time_one_day", |b| {
        b.iter(|| find_time(black_box(&asc), target, window, &config).expect("search should succeed"))
    });
    group.finish();
}

fn resolve_bench(c: &mut Criterion) {
    let eph = AnalyticEphemeris::new();
    let resolver = HoraryResolver::kp(&eph);
    let single = request(34);
    let all: Vec<_> = (1..=249).map(request).collect();

    let mut group = c.benchmark_group("horary_resolve");
    group.bench_function("resolve_single", |b| {
        b.iter(|| resolver.resolve(black_box(&single)).expect("resolve should succeed"))
    });
    group.sample_size(10);
    group.bench_function("resolve_batch_249_x4", |b| {
        b.iter(|| resolve_batch(&resolver, black_box(&all), 4))
    });
    group.finish();
}

criterion_group!(benches, find_time_bench, resolve_bench);
criterion_main!(benches);

//! CSV request and result files for `kp batch`.
//!
//! Input columns: `horary_number,date,latitude_deg,longitude_deg,utc_offset[,ayanamsha]`.
//! One output row per input row, in the same order; failed rows carry the
//! error text and empty result columns.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use kp_search::{HoraryResolution, ResolveError, SearchRequest};
use kp_time::parse_utc_offset;
use kp_vedic_base::{AyanamshaSystem, GeoLocation, deg_to_dms};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct RequestRow {
    horary_number: u32,
    date: NaiveDate,
    latitude_deg: f64,
    longitude_deg: f64,
    utc_offset: String,
    #[serde(default)]
    ayanamsha: Option<String>,
}

impl RequestRow {
    fn to_request(&self, default_ayanamsha: AyanamshaSystem) -> Result<SearchRequest> {
        let offset = parse_utc_offset(&self.utc_offset)?;
        let ayanamsha = match self.ayanamsha.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.parse()?,
            _ => default_ayanamsha,
        };
        Ok(SearchRequest::new(
            self.horary_number,
            self.date,
            GeoLocation::new(self.latitude_deg, self.longitude_deg, 0.0),
            offset,
        )
        .with_ayanamsha(ayanamsha))
    }
}

#[derive(Debug, Default, Serialize)]
struct ResultRow {
    horary_number: u32,
    date: String,
    matched_time: String,
    jd_ut: Option<f64>,
    ascendant_deg: Option<f64>,
    ascendant_dms: String,
    sign_lord: String,
    star_lord: String,
    sub_lord: String,
    sub_sub_lord: String,
    converged: Option<bool>,
    error: String,
}

impl ResultRow {
    fn new(request: &SearchRequest, result: &Result<HoraryResolution, ResolveError>) -> Self {
        let base = Self {
            horary_number: request.horary_number,
            date: request.date.to_string(),
            ..Self::default()
        };
        match result {
            Ok(r) => {
                let asc = &r.chart.ascendant;
                Self {
                    matched_time: r.matched_time.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
                    jd_ut: Some(r.search.jd_ut),
                    ascendant_deg: Some(asc.longitude_deg),
                    ascendant_dms: deg_to_dms(asc.longitude_deg).to_string(),
                    sign_lord: asc.sign_lord.to_string(),
                    star_lord: asc.star_lord.to_string(),
                    sub_lord: asc.sub_lord.to_string(),
                    sub_sub_lord: asc.sub_sub_lord.to_string(),
                    converged: Some(r.search.converged),
                    ..base
                }
            }
            Err(e) => Self {
                error: e.to_string(),
                ..base
            },
        }
    }
}

/// Parse every row; the first bad row aborts with its line number.
pub fn read_requests<R: Read>(reader: R, default_ayanamsha: AyanamshaSystem) -> Result<Vec<SearchRequest>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut requests = Vec::new();
    for (i, row) in rdr.deserialize::<RequestRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = row.with_context(|| format!("request file line {line}"))?;
        let request = row
            .to_request(default_ayanamsha)
            .with_context(|| format!("request file line {line}"))?;
        requests.push(request);
    }
    Ok(requests)
}

pub fn write_results<W: Write>(
    writer: W,
    requests: &[SearchRequest],
    results: &[Result<HoraryResolution, ResolveError>],
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (request, result) in requests.iter().zip(results) {
        wtr.serialize(ResultRow::new(request, result))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kp_ephem::AnalyticEphemeris;
    use kp_search::HoraryResolver;

    const INPUT: &str = "\
horary_number,date,latitude_deg,longitude_deg,utc_offset,ayanamsha
34, 2024-02-05, 11.0200858, 76.9831965, +5:30,
0,2024-02-05,11.02,76.98,+05:30,Lahiri
";

    #[test]
    fn reads_rows_with_default_ayanamsha() {
        let requests = read_requests(INPUT.as_bytes(), AyanamshaSystem::KP).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].horary_number, 34);
        assert_eq!(requests[0].ayanamsha, AyanamshaSystem::KP);
        assert_eq!(requests[0].utc_offset.local_minus_utc(), 19_800);
        assert_eq!(requests[1].ayanamsha, AyanamshaSystem::Lahiri);
    }

    #[test]
    fn ayanamsha_column_optional() {
        let input = "horary_number,date,latitude_deg,longitude_deg,utc_offset\n1,2024-01-01,0,0,Z\n";
        let requests = read_requests(input.as_bytes(), AyanamshaSystem::Raman).unwrap();
        assert_eq!(requests[0].ayanamsha, AyanamshaSystem::Raman);
    }

    #[test]
    fn bad_row_names_line() {
        let input = "horary_number,date,latitude_deg,longitude_deg,utc_offset\n1,2024-01-01,0,0,Z\n2,2024-13-01,0,0,Z\n";
        let err = read_requests(input.as_bytes(), AyanamshaSystem::KP).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"), "{err:#}");
    }

    #[test]
    fn bad_offset_names_line() {
        let input = "horary_number,date,latitude_deg,longitude_deg,utc_offset\n1,2024-01-01,0,0,+99\n";
        let err = read_requests(input.as_bytes(), AyanamshaSystem::KP).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"), "{err:#}");
    }

    #[test]
    fn writes_success_and_failure_rows() {
        let requests = read_requests(INPUT.as_bytes(), AyanamshaSystem::KP).unwrap();
        let eph = AnalyticEphemeris::new();
        let resolver = HoraryResolver::kp(&eph);
        let results: Vec<_> = requests.iter().map(|r| resolver.resolve(r)).collect();

        let mut out = Vec::new();
        write_results(&mut out, &requests, &results).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("horary_number,date,matched_time"));
        assert!(lines[1].starts_with("34,2024-02-05,2024-02-05 13:"), "{}", lines[1]);
        assert!(lines[1].contains(",Mercury,"), "{}", lines[1]);
        assert!(lines[2].contains("outside 1..=249"), "{}", lines[2]);
    }
}

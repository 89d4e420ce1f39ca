//! Loader tests for CSV partition files: accepted layouts and every
//! invariant violation the loader must reject.

use std::io::Write;

use kp_vedic_base::partition_file::DegreeFormat;
use kp_vedic_base::{
    SubDivision, SubDivisionTable, VedicError, load_partition_csv, read_partition_csv,
    write_partition_csv,
};
use tempfile::NamedTempFile;

fn exported(format: DegreeFormat) -> String {
    let mut buf = Vec::new();
    write_partition_csv(SubDivisionTable::kp(), &mut buf, format).expect("export should succeed");
    String::from_utf8(buf).expect("csv is utf-8")
}

fn rows(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn expect_malformed(text: &str, needle: &str) {
    match read_partition_csv(text.as_bytes()) {
        Err(VedicError::MalformedPartitionTable(msg)) => {
            assert!(msg.contains(needle), "message {msg:?} lacks {needle:?}")
        }
        other => panic!("expected MalformedPartitionTable, got {other:?}"),
    }
}

#[test]
fn loads_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(exported(DegreeFormat::Dms).as_bytes()).unwrap();
    let table = load_partition_csv(file.path()).unwrap();
    for (loaded, built) in table.iter().zip(SubDivisionTable::kp()) {
        assert_eq!(loaded.horary_number, built.horary_number);
        assert!((loaded.start_deg - built.start_deg).abs() < 1e-9);
        assert!((loaded.end_deg - built.end_deg).abs() < 1e-9);
        assert_eq!(
            (loaded.sign_lord, loaded.nakshatra_lord, loaded.sub_lord),
            (built.sign_lord, built.nakshatra_lord, built.sub_lord)
        );
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_partition_csv(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, VedicError::Io(_)), "{err:?}");
}

#[test]
fn tolerates_whitespace_and_mixed_lord_spellings() {
    let text = exported(DegreeFormat::Decimal)
        .replace(",Mercury", ", Me ")
        .replace(",Saturn", ",Shani");
    assert!(read_partition_csv(text.as_bytes()).is_ok());
}

#[test]
fn rejects_missing_row() {
    let mut lines = rows(&exported(DegreeFormat::Decimal));
    lines.remove(100);
    expect_malformed(&lines.join("\n"), "expected 249 divisions");
}

#[test]
fn rejects_gap_between_divisions() {
    let mut lines = rows(&exported(DegreeFormat::Decimal));
    // Row for horary 10: move its end forward so it no longer meets horary 11.
    let fields: Vec<&str> = lines[10].split(',').collect();
    let end: f64 = fields[2].parse().unwrap();
    let patched = format!("{},{},{:.10},{},{},{}", fields[0], fields[1], end - 0.01, fields[3], fields[4], fields[5]);
    lines[10] = patched;
    expect_malformed(&lines.join("\n"), "horary 10 ends at");
}

#[test]
fn rejects_misnumbered_rows() {
    let mut lines = rows(&exported(DegreeFormat::Decimal));
    lines.swap(5, 6);
    expect_malformed(&lines.join("\n"), "row 5 has horary number 6");
}

#[test]
fn rejects_unparseable_degree() {
    let text = exported(DegreeFormat::Decimal).replacen("0.0000000000", "zero", 1);
    expect_malformed(&text, "invalid start_degree 'zero'");
}

#[test]
fn rejects_overlapping_divisions() {
    let mut divs: Vec<SubDivision> = SubDivisionTable::kp().iter().copied().collect();
    divs[0].end_deg = 350.0;
    divs[1].start_deg = 350.0;
    let err = SubDivisionTable::from_divisions(divs).unwrap_err();
    assert!(matches!(err, VedicError::MalformedPartitionTable(_)), "{err:?}");
}

#[test]
fn rejects_empty_span() {
    let mut divs: Vec<SubDivision> = SubDivisionTable::kp().iter().copied().collect();
    divs[3].end_deg = divs[3].start_deg;
    divs[4].start_deg = divs[3].start_deg;
    let err = SubDivisionTable::from_divisions(divs).unwrap_err();
    assert_eq!(
        err,
        VedicError::MalformedPartitionTable(format!(
            "horary 4: empty span [{}, {})",
            divs_start(3),
            divs_start(3)
        ))
    );
}

fn divs_start(i: usize) -> f64 {
    SubDivisionTable::kp().as_slice()[i].start_deg
}

#[test]
fn rejects_second_wrapping_division() {
    // Rotate so one division crosses 0°, then make another one wrap too.
    let mut divs: Vec<SubDivision> = SubDivisionTable::kp()
        .iter()
        .map(|d| SubDivision {
            start_deg: (d.start_deg + 359.0) % 360.0,
            end_deg: (d.end_deg + 359.0) % 360.0,
            ..*d
        })
        .collect();
    divs[100].end_deg = divs[99].start_deg;
    let err = SubDivisionTable::from_divisions(divs).unwrap_err();
    assert!(matches!(err, VedicError::MalformedPartitionTable(_)), "{err:?}");
}

#[test]
fn rejects_non_finite_boundary() {
    let mut divs: Vec<SubDivision> = SubDivisionTable::kp().iter().copied().collect();
    divs[7].end_deg = f64::NAN;
    assert!(SubDivisionTable::from_divisions(divs).is_err());
}

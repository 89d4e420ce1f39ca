//! CSV partition files.
//!
//! Columns: `horary_number,start_degree,end_degree,sign_lord,nakshatra_lord,sub_lord`.
//! Degrees are decimal or `D:M:S`; lords are English, Sanskrit or
//! two-letter names. A loaded table must pass
//! [`SubDivisionTable::from_divisions`] and is never corrected.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::VedicError;
use crate::graha::Graha;
use crate::rashi::{deg_to_dms, parse_dms};
use crate::subdivision::{SubDivision, SubDivisionTable};

#[derive(Debug, Deserialize, Serialize)]
struct PartitionRecord {
    horary_number: u32,
    start_degree: String,
    end_degree: String,
    sign_lord: String,
    nakshatra_lord: String,
    sub_lord: String,
}

/// How degrees are written by [`write_partition_csv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegreeFormat {
    /// Ten decimal places.
    #[default]
    Decimal,
    /// `D:MM:SS` rounded to the arcsecond.
    Dms,
}

impl PartitionRecord {
    fn into_division(self, row: usize) -> Result<SubDivision, VedicError> {
        let bad = |what: &str, value: &str| {
            VedicError::MalformedPartitionTable(format!("row {row}: invalid {what} '{value}'"))
        };
        let degree = |v: &str, what: &str| parse_dms(v).ok_or_else(|| bad(what, v));
        let lord = |v: &str, what: &str| v.parse::<Graha>().map_err(|_| bad(what, v));

        let horary_number = u16::try_from(self.horary_number)
            .map_err(|_| bad("horary_number", &self.horary_number.to_string()))?;

        Ok(SubDivision {
            horary_number,
            start_deg: degree(&self.start_degree, "start_degree")?,
            end_deg: degree(&self.end_degree, "end_degree")?,
            sign_lord: lord(&self.sign_lord, "sign_lord")?,
            nakshatra_lord: lord(&self.nakshatra_lord, "nakshatra_lord")?,
            sub_lord: lord(&self.sub_lord, "sub_lord")?,
        })
    }
}

/// Parse and validate a partition table from any reader.
pub fn read_partition_csv<R: Read>(reader: R) -> Result<SubDivisionTable, VedicError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut divisions = Vec::new();
    for (i, record) in csv.deserialize::<PartitionRecord>().enumerate() {
        divisions.push(record?.into_division(i + 1)?);
    }
    debug!(rows = divisions.len(), "parsed partition rows");

    SubDivisionTable::from_divisions(divisions)
}

/// Load a partition table from a CSV file.
pub fn load_partition_csv(path: impl AsRef<Path>) -> Result<SubDivisionTable, VedicError> {
    let path = path.as_ref();
    let table = read_partition_csv(File::open(path)?)?;
    info!(path = %path.display(), divisions = table.len(), "loaded partition table");
    Ok(table)
}

/// Write a table in the format accepted by [`read_partition_csv`].
pub fn write_partition_csv<W: Write>(
    table: &SubDivisionTable,
    writer: W,
    format: DegreeFormat,
) -> Result<(), VedicError> {
    let render = |deg: f64| match format {
        DegreeFormat::Decimal => format!("{deg:.10}"),
        DegreeFormat::Dms => deg_to_dms(deg).to_string(),
    };

    let mut csv = csv::Writer::from_writer(writer);
    for d in table {
        csv.serialize(PartitionRecord {
            horary_number: u32::from(d.horary_number),
            start_degree: render(d.start_deg),
            end_degree: render(d.end_deg),
            sign_lord: d.sign_lord.english_name().to_string(),
            nakshatra_lord: d.nakshatra_lord.english_name().to_string(),
            sub_lord: d.sub_lord.english_name().to_string(),
        })?;
    }
    csv.flush()?;
    Ok(())
}

//! Full KP lord chain for a sidereal longitude.
//!
//! Sign lord → star lord → sub lord come from the horary division that
//! contains the longitude, so a chain never disagrees with the table it was
//! read from. The sub-sub level repeats the Vimshottari proportions inside
//! the whole sub (both halves of a sub split at a sign boundary), starting
//! from the sub lord.

use serde::Serialize;

use crate::graha::{Graha, VIMSHOTTARI_ORDER, VIMSHOTTARI_TOTAL_YEARS};
use crate::nakshatra::{Nakshatra, nakshatra_from_longitude};
use crate::rashi::{Rashi, rashi_from_longitude};
use crate::subdivision::{SubDivision, SubDivisionTable};
use crate::util::{arc_forward, normalize_360};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpLords {
    pub longitude_deg: f64,
    pub rashi: Rashi,
    pub nakshatra: Nakshatra,
    pub pada: u8,
    pub sign_lord: Graha,
    pub star_lord: Graha,
    pub sub_lord: Graha,
    pub sub_sub_lord: Graha,
    /// Horary division the longitude falls in.
    pub horary_number: u16,
}

/// Lord of the Vimshottari share containing `offset` in a cycle of width
/// `span` that starts at `first`.
fn vimshottari_share(first: Graha, span: f64, offset: f64) -> Graha {
    let start_idx = first.vimshottari_index();
    let mut acc = 0.0;
    let mut lord = first;
    for k in 0..9 {
        lord = VIMSHOTTARI_ORDER[(start_idx + k) % 9];
        acc += span * f64::from(lord.vimshottari_years()) / f64::from(VIMSHOTTARI_TOTAL_YEARS);
        if offset < acc {
            return lord;
        }
    }
    // Rounding at the very end of the cycle
    lord
}

/// Start and width of the whole sub that `d` belongs to.
///
/// A neighbour with the same star and sub lord is the other half of a sub
/// split at a sign boundary. Adjacent nakshatras never share a star lord, so
/// no other neighbour can match.
fn sub_extent(table: &SubDivisionTable, d: &SubDivision) -> (f64, f64) {
    let count = table.len() as u32;
    let n = u32::from(d.horary_number);
    let same_sub = |o: &&SubDivision| o.nakshatra_lord == d.nakshatra_lord && o.sub_lord == d.sub_lord;
    let prev = table.lookup(if n == 1 { count } else { n - 1 }).ok().filter(same_sub);
    let next = table.lookup(if n == count { 1 } else { n + 1 }).ok().filter(same_sub);

    let start = prev.map_or(d.start_deg, |p| p.start_deg);
    let width = d.span_deg()
        + prev.map_or(0.0, |p| p.span_deg())
        + next.map_or(0.0, |p| p.span_deg());
    (start, width)
}

/// Lord chain for a sidereal longitude (degrees, any range) against the
/// built-in KP table.
pub fn kp_lords(sidereal_lon_deg: f64) -> KpLords {
    kp_lords_in(SubDivisionTable::kp(), sidereal_lon_deg)
}

/// Lord chain for a sidereal longitude against `table`.
pub fn kp_lords_in(table: &SubDivisionTable, sidereal_lon_deg: f64) -> KpLords {
    let lon = normalize_360(sidereal_lon_deg);
    let division = table.locate(lon);
    let nak = nakshatra_from_longitude(lon);

    let (sub_start, sub_width) = sub_extent(table, division);
    let sub_sub_lord = vimshottari_share(division.sub_lord, sub_width, arc_forward(sub_start, lon));

    KpLords {
        longitude_deg: lon,
        rashi: rashi_from_longitude(lon).rashi,
        nakshatra: nak.nakshatra,
        pada: nak.pada,
        sign_lord: division.sign_lord,
        star_lord: division.nakshatra_lord,
        sub_lord: division.sub_lord,
        sub_sub_lord,
        horary_number: division.horary_number,
    }
}

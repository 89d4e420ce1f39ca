//! The KP 249-fold sub-division of the zodiac.
//!
//! Each of the 27 nakshatras is cut into nine subs proportional to the
//! Vimshottari years, starting from the nakshatra's own lord. Six subs
//! straddle a sign boundary and are split there so every division has a
//! single sign lord, giving 243 + 6 = 249 divisions, numbered 1..=249 in
//! zodiacal order. Horary number `n` is the querent's pick.
//!
//! Boundaries are built in integer units of 1/9° (nakshatra = 120,
//! sign = 270, circle = 3240) and divided once, so every boundary is
//! the correctly rounded double and the last one is exactly 360.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::graha::{Graha, VIMSHOTTARI_ORDER};
use crate::rashi::Rashi;
use crate::util::normalize_360;

/// Number of KP horary divisions.
pub const HORARY_COUNT: usize = 249;

const UNITS_PER_DEGREE: f64 = 9.0;
const NAKSHATRA_UNITS: u32 = 120;
const RASHI_UNITS: u32 = 270;

/// Contiguity tolerance for loaded tables, about 0.004″. Files that round
/// an end and the next start differently still load.
const BOUNDARY_TOLERANCE_DEG: f64 = 1e-6;

/// Tolerance on the total of all spans.
const TOTAL_SPAN_TOLERANCE_DEG: f64 = 1e-9;

/// One horary division: a half-open arc `[start_deg, end_deg)` with its
/// three-level lord chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubDivision {
    /// 1..=249
    pub horary_number: u16,
    pub start_deg: f64,
    /// Exclusive end. Equals 360.0 for the last built division; smaller
    /// than `start_deg` only for a loaded division that wraps past 0°.
    pub end_deg: f64,
    pub sign_lord: Graha,
    pub nakshatra_lord: Graha,
    pub sub_lord: Graha,
}

impl SubDivision {
    /// True if the arc crosses 0° (`end_deg < start_deg`).
    pub fn wraps(&self) -> bool {
        self.end_deg < self.start_deg
    }

    /// Angular width in degrees.
    pub fn span_deg(&self) -> f64 {
        if self.wraps() {
            self.end_deg + 360.0 - self.start_deg
        } else {
            self.end_deg - self.start_deg
        }
    }

    /// Arc midpoint, normalized to [0, 360).
    pub fn midpoint_deg(&self) -> f64 {
        normalize_360(self.start_deg + self.span_deg() / 2.0)
    }

    /// Half-open membership test, modulo 360.
    pub fn contains(&self, deg: f64) -> bool {
        let d = normalize_360(deg);
        if self.wraps() {
            d >= self.start_deg || d < self.end_deg
        } else {
            d >= self.start_deg && d < self.end_deg
        }
    }
}

/// Immutable partition of the circle into [`HORARY_COUNT`] divisions.
#[derive(Debug, Clone, PartialEq)]
pub struct SubDivisionTable {
    /// In horary-number order.
    divisions: Vec<SubDivision>,
    /// Division indices sorted by `start_deg`.
    by_start: Vec<usize>,
    /// `start_deg` of `by_start[i]`, for binary search.
    starts: Vec<f64>,
}

impl SubDivisionTable {
    /// Construct the standard KP table.
    pub fn build() -> Self {
        let mut divisions = Vec::with_capacity(HORARY_COUNT);
        let mut push = |from: u32, to: u32, star: Graha, sub: Graha| {
            divisions.push(SubDivision {
                horary_number: divisions.len() as u16 + 1,
                start_deg: from as f64 / UNITS_PER_DEGREE,
                end_deg: to as f64 / UNITS_PER_DEGREE,
                sign_lord: Rashi::from_index((from / RASHI_UNITS) as usize).lord(),
                nakshatra_lord: star,
                sub_lord: sub,
            });
        };

        for nak in 0..27u32 {
            let first = nak as usize % 9;
            let star = VIMSHOTTARI_ORDER[first];
            let mut cursor = nak * NAKSHATRA_UNITS;
            for k in 0..9 {
                let sub = VIMSHOTTARI_ORDER[(first + k) % 9];
                let end = cursor + sub.vimshottari_years();
                let sign_boundary = (cursor / RASHI_UNITS + 1) * RASHI_UNITS;
                if end > sign_boundary {
                    push(cursor, sign_boundary, star, sub);
                    cursor = sign_boundary;
                }
                push(cursor, end, star, sub);
                cursor = end;
            }
        }

        debug_assert_eq!(divisions.len(), HORARY_COUNT);
        Self::index(divisions)
    }

    /// Process-wide standard table, built on first use.
    pub fn kp() -> &'static SubDivisionTable {
        static TABLE: OnceLock<SubDivisionTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    /// Validate externally supplied divisions and index them.
    ///
    /// Checks: exactly 249 entries numbered 1..=249 in order, finite
    /// boundaries in [0, 360], positive spans, at most one division
    /// crossing 0°, each end meeting the next start, and a total span
    /// of 360°.
    pub fn from_divisions(divisions: Vec<SubDivision>) -> Result<Self, VedicError> {
        let malformed = |msg: String| Err(VedicError::MalformedPartitionTable(msg));

        if divisions.len() != HORARY_COUNT {
            return malformed(format!("expected {HORARY_COUNT} divisions, found {}", divisions.len()));
        }

        let mut wrapping = 0usize;
        let mut total = 0.0;
        for (i, d) in divisions.iter().enumerate() {
            let n = d.horary_number;
            if usize::from(n) != i + 1 {
                return malformed(format!("row {} has horary number {n}, expected {}", i + 1, i + 1));
            }
            if !d.start_deg.is_finite() || !(0.0..360.0).contains(&d.start_deg) {
                return malformed(format!("horary {n}: start {} outside [0, 360)", d.start_deg));
            }
            if !d.end_deg.is_finite() || !(0.0..=360.0).contains(&d.end_deg) {
                return malformed(format!("horary {n}: end {} outside [0, 360]", d.end_deg));
            }
            if d.wraps() {
                wrapping += 1;
            }
            let span = d.span_deg();
            if span <= 0.0 {
                return malformed(format!("horary {n}: empty span [{}, {})", d.start_deg, d.end_deg));
            }
            total += span;

            let next = &divisions[(i + 1) % HORARY_COUNT];
            let gap = (normalize_360(d.end_deg) - next.start_deg).abs();
            if gap > BOUNDARY_TOLERANCE_DEG && (360.0 - gap) > BOUNDARY_TOLERANCE_DEG {
                return malformed(format!(
                    "horary {n} ends at {} but horary {} starts at {}",
                    d.end_deg, next.horary_number, next.start_deg
                ));
            }
        }

        if wrapping > 1 {
            return malformed(format!("{wrapping} divisions cross 0°, at most one may"));
        }
        if (total - 360.0).abs() > TOTAL_SPAN_TOLERANCE_DEG {
            return malformed(format!("spans sum to {total}°, expected 360°"));
        }

        Ok(Self::index(divisions))
    }

    fn index(divisions: Vec<SubDivision>) -> Self {
        let mut by_start: Vec<usize> = (0..divisions.len()).collect();
        by_start.sort_by(|&a, &b| divisions[a].start_deg.total_cmp(&divisions[b].start_deg));
        let starts = by_start.iter().map(|&i| divisions[i].start_deg).collect();
        Self {
            divisions,
            by_start,
            starts,
        }
    }

    /// Division for a horary number.
    pub fn lookup(&self, horary_number: u32) -> Result<&SubDivision, VedicError> {
        usize::try_from(horary_number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.divisions.get(i))
            .ok_or(VedicError::HoraryOutOfRange(horary_number))
    }

    /// Division containing `deg` (taken modulo 360). Total over all finite input.
    pub fn locate(&self, deg: f64) -> &SubDivision {
        let d = normalize_360(deg);
        let pos = self.starts.partition_point(|&s| s <= d);
        // Below the first start means we are in the division that wraps past 0°,
        // which sorts last.
        let slot = if pos == 0 { self.by_start.len() - 1 } else { pos - 1 };
        &self.divisions[self.by_start[slot]]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SubDivision> {
        self.divisions.iter()
    }

    pub fn as_slice(&self) -> &[SubDivision] {
        &self.divisions
    }

    pub fn len(&self) -> usize {
        self.divisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    pub fn total_span_deg(&self) -> f64 {
        self.divisions.iter().map(SubDivision::span_deg).sum()
    }
}

impl Default for SubDivisionTable {
    fn default() -> Self {
        Self::kp().clone()
    }
}

impl<'a> IntoIterator for &'a SubDivisionTable {
    type Item = &'a SubDivision;
    type IntoIter = std::slice::Iter<'a, SubDivision>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_249() {
        let t = SubDivisionTable::build();
        assert_eq!(t.len(), HORARY_COUNT);
        assert_eq!(t.as_slice()[0].start_deg, 0.0);
        assert_eq!(t.as_slice()[HORARY_COUNT - 1].end_deg, 360.0);
    }

    #[test]
    fn first_and_last_lords() {
        let t = SubDivisionTable::kp();
        let first = t.lookup(1).unwrap();
        assert_eq!((first.sign_lord, first.nakshatra_lord, first.sub_lord), (Graha::Mangal, Graha::Ketu, Graha::Ketu));
        let last = t.lookup(249).unwrap();
        assert_eq!((last.sign_lord, last.nakshatra_lord, last.sub_lord), (Graha::Guru, Graha::Buddh, Graha::Shani));
    }

    #[test]
    fn out_of_range_numbers() {
        let t = SubDivisionTable::kp();
        assert_eq!(t.lookup(0), Err(VedicError::HoraryOutOfRange(0)));
        assert_eq!(t.lookup(250), Err(VedicError::HoraryOutOfRange(250)));
    }

    #[test]
    fn contains_wrapping_division() {
        let d = SubDivision {
            horary_number: 1,
            start_deg: 355.0,
            end_deg: 2.0,
            sign_lord: Graha::Guru,
            nakshatra_lord: Graha::Buddh,
            sub_lord: Graha::Shani,
        };
        assert!(d.wraps());
        assert!((d.span_deg() - 7.0).abs() < 1e-12);
        assert!(d.contains(359.0) && d.contains(0.0) && d.contains(1.9) && d.contains(-3.0));
        assert!(!d.contains(2.0) && !d.contains(354.9));
        assert!((d.midpoint_deg() - 358.5).abs() < 1e-12);
    }

    #[test]
    fn locate_boundaries_are_half_open() {
        let t = SubDivisionTable::kp();
        let d2 = t.lookup(2).unwrap();
        assert_eq!(t.locate(d2.start_deg).horary_number, 2);
        assert_eq!(t.locate(d2.end_deg).horary_number, 3);
        assert_eq!(t.locate(360.0).horary_number, 1);
        assert_eq!(t.locate(-1e-9).horary_number, 249);
    }

    #[test]
    fn rotated_table_with_wrap_validates() {
        // Shift every boundary by -1°, so horary 1 straddles 0°.
        let rotated: Vec<SubDivision> = SubDivisionTable::kp()
            .iter()
            .map(|d| SubDivision {
                start_deg: normalize_360(d.start_deg - 1.0),
                end_deg: normalize_360(d.end_deg - 1.0),
                ..*d
            })
            .collect();
        let t = SubDivisionTable::from_divisions(rotated).unwrap();
        assert_eq!(t.locate(359.5).horary_number, 1);
        assert_eq!(t.locate(0.0).horary_number, 2);
        assert_eq!(t.locate(358.9).horary_number, 249);
    }

    #[test]
    fn total_span_checked_at_nanodegree() {
        // Shrink the last division by 5e-9°: within the contiguity tolerance,
        // but the spans no longer sum to 360.
        let mut divisions = SubDivisionTable::kp().as_slice().to_vec();
        divisions[HORARY_COUNT - 1].end_deg -= 5e-9;
        let err = SubDivisionTable::from_divisions(divisions).unwrap_err();
        assert!(
            matches!(&err, VedicError::MalformedPartitionTable(m) if m.contains("sum")),
            "{err:?}"
        );
    }
}

//! The nine grahas and their Vimshottari weights.
//!
//! In KP every lordship (sign, star, sub, sub-sub) is one of these nine.
//! The Vimshottari dasha years double as the proportional weights that
//! carve each nakshatra into subs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Graha {
    #[serde(rename = "Sun")]
    Surya,
    #[serde(rename = "Moon")]
    Chandra,
    #[serde(rename = "Mars")]
    Mangal,
    #[serde(rename = "Mercury")]
    Buddh,
    #[serde(rename = "Jupiter")]
    Guru,
    #[serde(rename = "Venus")]
    Shukra,
    #[serde(rename = "Saturn")]
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in chart order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

/// Vimshottari dasha sequence. Nakshatra `n` (0-based from Ashwini) is
/// ruled by `VIMSHOTTARI_ORDER[n % 9]`.
pub const VIMSHOTTARI_ORDER: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// Sum of all Vimshottari periods.
pub const VIMSHOTTARI_TOTAL_YEARS: u32 = 120;

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Two-letter abbreviation used in KP tables.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Surya => "Su",
            Self::Chandra => "Mo",
            Self::Mangal => "Ma",
            Self::Buddh => "Me",
            Self::Guru => "Ju",
            Self::Shukra => "Ve",
            Self::Shani => "Sa",
            Self::Rahu => "Ra",
            Self::Ketu => "Ke",
        }
    }

    /// 0-based index into [`ALL_GRAHAS`].
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Vimshottari dasha period in years, which is also the sub weight.
    pub const fn vimshottari_years(self) -> u32 {
        match self {
            Self::Ketu => 7,
            Self::Shukra => 20,
            Self::Surya => 6,
            Self::Chandra => 10,
            Self::Mangal => 7,
            Self::Rahu => 18,
            Self::Guru => 16,
            Self::Shani => 19,
            Self::Buddh => 17,
        }
    }

    /// Position in [`VIMSHOTTARI_ORDER`].
    pub const fn vimshottari_index(self) -> usize {
        match self {
            Self::Ketu => 0,
            Self::Shukra => 1,
            Self::Surya => 2,
            Self::Chandra => 3,
            Self::Mangal => 4,
            Self::Rahu => 5,
            Self::Guru => 6,
            Self::Shani => 7,
            Self::Buddh => 8,
        }
    }

    /// Nodes always move retrograde in mean motion.
    pub const fn is_node(self) -> bool {
        matches!(self, Self::Rahu | Self::Ketu)
    }
}

impl fmt::Display for Graha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english_name())
    }
}

impl FromStr for Graha {
    type Err = VedicError;

    /// Accepts English, Sanskrit or two-letter names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ALL_GRAHAS
            .into_iter()
            .find(|g| {
                needle.eq_ignore_ascii_case(g.english_name())
                    || needle.eq_ignore_ascii_case(g.name())
                    || needle.eq_ignore_ascii_case(g.abbreviation())
            })
            .ok_or_else(|| VedicError::UnknownName {
                kind: "graha",
                name: s.to_string(),
            })
    }
}

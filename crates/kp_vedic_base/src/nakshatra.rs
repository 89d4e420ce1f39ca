//! Nakshatras (lunar mansions) and their star lords.
//!
//! 27 equal mansions of 13°20′ from Ashwini at 0° sidereal, each with four
//! padas of 3°20′. The star lord cycles through the Vimshottari sequence
//! three times around the zodiac.

use serde::{Deserialize, Serialize};

use crate::graha::{Graha, VIMSHOTTARI_ORDER};
use crate::util::normalize_360;

/// 360/27 = 13.3333…°.
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishta,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

pub const ALL_NAKSHATRAS: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishta,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishta => "Dhanishta",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Star lord: the Vimshottari ruler of this nakshatra.
    pub const fn lord(self) -> Graha {
        VIMSHOTTARI_ORDER[self as usize % 9]
    }

    pub fn start_deg(self) -> f64 {
        self as u8 as f64 * NAKSHATRA_SPAN
    }
}

/// Position of a longitude within its nakshatra.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    /// Pada (quarter), 1..=4.
    pub pada: u8,
    /// Degrees elapsed inside the nakshatra, [0, 13.333…).
    pub degrees_in_nakshatra: f64,
}

pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> NakshatraInfo {
    let lon = normalize_360(sidereal_lon_deg);
    // In 1/9° units every nakshatra and pada boundary is an integer, so a
    // boundary degree lands in the mansion it opens.
    let units = lon * 9.0;
    let idx = ((units / 120.0).floor() as usize).min(26);
    let units_in_nakshatra = (units - idx as f64 * 120.0).max(0.0);
    let pada = ((units_in_nakshatra / 30.0).floor() as u8).min(3) + 1;
    let degrees_in_nakshatra = (lon - idx as f64 * NAKSHATRA_SPAN).max(0.0);
    NakshatraInfo {
        nakshatra: ALL_NAKSHATRAS[idx],
        pada,
        degrees_in_nakshatra,
    }
}

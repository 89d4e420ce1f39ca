//! Rashi (zodiac sign), sign lordship and DMS handling.
//!
//! Twelve equal signs of 30° from Mesha (Aries) at 0° sidereal.
//! Sign lords follow the classical scheme in which Mars, Venus, Mercury,
//! Jupiter and Saturn each rule two signs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::graha::Graha;
use crate::util::normalize_360;

/// The 12 rashis starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rashi {
    #[serde(rename = "Aries")]
    Mesha,
    #[serde(rename = "Taurus")]
    Vrishabha,
    #[serde(rename = "Gemini")]
    Mithuna,
    #[serde(rename = "Cancer")]
    Karka,
    #[serde(rename = "Leo")]
    Simha,
    #[serde(rename = "Virgo")]
    Kanya,
    #[serde(rename = "Libra")]
    Tula,
    #[serde(rename = "Scorpio")]
    Vrischika,
    #[serde(rename = "Sagittarius")]
    Dhanu,
    #[serde(rename = "Capricorn")]
    Makara,
    #[serde(rename = "Aquarius")]
    Kumbha,
    #[serde(rename = "Pisces")]
    Meena,
}

pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rashi for a 0-based index, wrapping modulo 12.
    pub const fn from_index(i: usize) -> Self {
        ALL_RASHIS[i % 12]
    }

    /// Planetary lord of the sign.
    pub const fn lord(self) -> Graha {
        match self {
            Self::Mesha | Self::Vrischika => Graha::Mangal,
            Self::Vrishabha | Self::Tula => Graha::Shukra,
            Self::Mithuna | Self::Kanya => Graha::Buddh,
            Self::Karka => Graha::Chandra,
            Self::Simha => Graha::Surya,
            Self::Dhanu | Self::Meena => Graha::Guru,
            Self::Makara | Self::Kumbha => Graha::Shani,
        }
    }

    /// Starting longitude of the sign in degrees.
    pub const fn start_deg(self) -> f64 {
        self as u8 as f64 * 30.0
    }
}

impl fmt::Display for Rashi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.western_name())
    }
}

impl FromStr for Rashi {
    type Err = VedicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ALL_RASHIS
            .into_iter()
            .find(|r| needle.eq_ignore_ascii_case(r.western_name()) || needle.eq_ignore_ascii_case(r.name()))
            .ok_or_else(|| VedicError::UnknownName {
                kind: "rashi",
                name: s.to_string(),
            })
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds (0.0..60.0), may include a fractional part.
    pub seconds: f64,
}

impl fmt::Display for Dms {
    /// `D:MM:SS`, seconds rounded with carry into minutes and degrees.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = (dms_to_deg(self) * 3600.0).round() as u64;
        write!(f, "{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
    }
}

/// Position of a longitude within its rashi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RashiInfo {
    pub rashi: Rashi,
    /// Decimal degrees within the rashi, [0, 30).
    pub degrees_in_rashi: f64,
    pub dms: Dms,
}

pub fn dms_to_deg(dms: &Dms) -> f64 {
    dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0
}

/// Decimal degrees to DMS. Negative input is taken by absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let degrees = d.floor();
    let remainder = (d - degrees) * 60.0;
    let minutes = remainder.floor();
    Dms {
        degrees: degrees as u16,
        minutes: minutes as u8,
        seconds: (remainder - minutes) * 60.0,
    }
}

/// Parse `D:M:S`, `D:M` or plain decimal degrees.
pub fn parse_dms(s: &str) -> Option<f64> {
    let s = s.trim();
    if !s.contains(':') {
        return s.parse::<f64>().ok().filter(|v| v.is_finite());
    }
    let mut parts = s.split(':');
    let d: u16 = parts.next()?.trim().parse().ok()?;
    let m: u8 = parts.next()?.trim().parse().ok()?;
    let sec: f64 = match parts.next() {
        Some(p) => p.trim().parse().ok()?,
        None => 0.0,
    };
    if parts.next().is_some() || m >= 60 || !(0.0..60.0).contains(&sec) {
        return None;
    }
    Some(dms_to_deg(&Dms {
        degrees: d,
        minutes: m,
        seconds: sec,
    }))
}

/// Rashi of a sidereal longitude.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let idx = ((lon / 30.0).floor() as usize).min(11);
    let degrees_in_rashi = lon - idx as f64 * 30.0;
    RashiInfo {
        rashi: ALL_RASHIS[idx],
        degrees_in_rashi,
        dms: deg_to_dms(degrees_in_rashi),
    }
}

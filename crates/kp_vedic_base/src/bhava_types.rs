//! House (bhava) types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::util::arc_forward;

/// House division method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BhavaSystem {
    /// Semi-arc time trisection; the KP standard.
    #[default]
    Placidus,
    /// 30° houses from the Ascendant degree.
    Equal,
    /// Porphyry: ecliptic trisection of each quadrant.
    Sripati,
    /// Each sign is one house, starting from the rising sign.
    WholeSign,
}

impl BhavaSystem {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Placidus => "Placidus",
            Self::Equal => "Equal",
            Self::Sripati => "Sripati",
            Self::WholeSign => "Whole Sign",
        }
    }

    /// Systems that depend on latitude through semi-arcs.
    pub const fn is_time_based(self) -> bool {
        matches!(self, Self::Placidus)
    }
}

impl fmt::Display for BhavaSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BhavaSystem {
    type Err = VedicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "placidus" | "kp" => Ok(Self::Placidus),
            "equal" => Ok(Self::Equal),
            "sripati" | "porphyry" => Ok(Self::Sripati),
            "wholesign" | "whole" => Ok(Self::WholeSign),
            _ => Err(VedicError::UnknownName {
                kind: "house system",
                name: s.to_string(),
            }),
        }
    }
}

/// One house, from its cusp to the next cusp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bhava {
    /// House number, 1..=12.
    pub number: u8,
    /// Sidereal cusp longitude.
    pub cusp_deg: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

/// Twelve sidereal houses plus the angles they were built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BhavaResult {
    pub system: BhavaSystem,
    pub bhavas: [Bhava; 12],
    /// Sidereal Ascendant.
    pub ascendant_deg: f64,
    /// Sidereal MC.
    pub mc_deg: f64,
}

impl BhavaResult {
    pub fn cusps(&self) -> [f64; 12] {
        self.bhavas.map(|b| b.cusp_deg)
    }

    /// House (1..=12) containing a sidereal longitude.
    pub fn house_of(&self, longitude_deg: f64) -> u8 {
        self.bhavas
            .iter()
            .find(|b| arc_forward(b.start_deg, longitude_deg) < arc_forward(b.start_deg, b.end_deg))
            .map_or(1, |b| b.number)
    }
}

//! Vedic building blocks for Krishnamurti Paddhati (KP) horary work.
//!
//! This crate provides:
//! - Grahas, rashis and nakshatras with their lordships
//! - The 249-way KP sub-division table ([`SubDivisionTable`])
//! - Full KP lord chains down to the sub-sub lord ([`kp_lords`])
//! - Ayanamsha systems
//! - Lagna/MC from local sidereal time and bhava cusps
//! - A CSV partition-file loader and writer

pub mod ayanamsha;
pub mod bhava;
pub mod bhava_types;
pub mod error;
pub mod graha;
pub mod kp_lords;
pub mod lagna;
pub mod location;
pub mod nakshatra;
pub mod partition_file;
pub mod rashi;
pub mod subdivision;
pub mod util;

pub use ayanamsha::{AyanamshaSystem, ayanamsha_deg};
pub use bhava::compute_bhavas;
pub use bhava_types::{Bhava, BhavaResult, BhavaSystem};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, VIMSHOTTARI_ORDER, VIMSHOTTARI_TOTAL_YEARS};
pub use kp_lords::{KpLords, kp_lords, kp_lords_in};
pub use lagna::{AscendantMc, ascendant_and_mc_deg, ascendant_deg};
pub use location::GeoLocation;
pub use nakshatra::{ALL_NAKSHATRAS, NAKSHATRA_SPAN, Nakshatra, NakshatraInfo, nakshatra_from_longitude};
pub use partition_file::{DegreeFormat, load_partition_csv, read_partition_csv, write_partition_csv};
pub use rashi::{ALL_RASHIS, Dms, Rashi, RashiInfo, deg_to_dms, dms_to_deg, parse_dms, rashi_from_longitude};
pub use subdivision::{HORARY_COUNT, SubDivision, SubDivisionTable};
pub use util::{arc_forward, normalize_360, normalize_pm180};

//! Time-scale helpers for horary resolution.
//!
//! This crate provides:
//! - Julian Date ↔ Gregorian calendar conversions
//! - ΔT (TT − UT) estimates for the analytic ephemeris
//! - Greenwich and local sidereal time
//! - Civil (fixed UTC offset) timestamps ↔ Julian Date UT

pub mod civil;
pub mod delta_t;
pub mod error;
pub mod julian;
pub mod sidereal;

pub use civil::{
    civil_to_jd_ut, datetime_to_jd_ut, format_utc_offset, jd_ut_to_civil, local_day_window, parse_utc_offset,
};
pub use delta_t::{delta_t_seconds, jd_ut_to_jd_tt};
pub use error::TimeError;
pub use julian::{
    J2000_JD, JD_UNIX_EPOCH, SECONDS_PER_DAY, calendar_to_jd, decimal_year, jd_to_calendar,
    jd_to_centuries,
};
pub use sidereal::{earth_rotation_angle_rad, gmst_rad, local_sidereal_time_rad};

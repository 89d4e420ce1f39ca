//! Ephemeris access for horary resolution.
//!
//! [`Ephemeris`] is the seam between the search and any position source.
//! [`AnalyticEphemeris`] implements it with closed-form series so the
//! workspace runs without external kernel files.

pub mod analytic;
pub mod error;
pub mod kepler;
pub mod moon;
pub mod provider;

pub use analytic::AnalyticEphemeris;
pub use error::EphemerisError;
pub use provider::{Ephemeris, GrahaPosition};

//! Ecliptic frame quantities used by the horary engine.
//!
//! All functions take `t` = Julian centuries of TT since J2000.0.

pub mod fundamental;
pub mod nutation;
pub mod obliquity;
pub mod precession;

pub use fundamental::{FundamentalArguments, fundamental_arguments};
pub use nutation::{Nutation, nutation};
pub use obliquity::{mean_obliquity_deg, true_obliquity_deg};
pub use precession::general_precession_longitude_deg;

//! Geographic observer location.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;

/// Observer position on the Earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Height above the ellipsoid in metres.
    #[serde(default)]
    pub altitude_m: f64,
}

impl GeoLocation {
    pub const fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Reject non-finite or out-of-range coordinates.
    pub fn validate(&self) -> Result<(), VedicError> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(VedicError::InvalidLocation("latitude must be within [-90, 90]"));
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err(VedicError::InvalidLocation("longitude must be within [-180, 180]"));
        }
        if !self.altitude_m.is_finite() {
            return Err(VedicError::InvalidLocation("altitude must be finite"));
        }
        Ok(())
    }

    /// Bit pattern of the coordinates, usable as a hash key.
    pub fn key_bits(&self) -> [u64; 3] {
        [
            self.latitude_deg.to_bits(),
            self.longitude_deg.to_bits(),
            self.altitude_m.to_bits(),
        ]
    }
}

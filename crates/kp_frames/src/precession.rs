//! General precession in ecliptic longitude.
//!
//! Sidereal longitudes are tropical longitudes minus an ayanamsha, and
//! every ayanamsha here is a J2000 reference value plus this
//! accumulated precession.
//!
//! Source: Capitaine, Wallace & Chapront 2003, Eq. 39 (IAU 2006 p_A).

/// Accumulated general precession in longitude since J2000.0, in arcseconds.
pub fn general_precession_longitude_arcsec(t: f64) -> f64 {
    t * (5028.796195 + t * (1.1054348 + t * (0.00007964 + t * (-0.000023857 - t * 0.0000000383))))
}

/// Accumulated general precession in longitude since J2000.0, in degrees.
pub fn general_precession_longitude_deg(t: f64) -> f64 {
    general_precession_longitude_arcsec(t) / 3600.0
}

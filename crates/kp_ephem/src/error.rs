//! Error types for ephemeris queries.

use kp_vedic_base::VedicError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// Moment outside the provider's supported range.
    #[error("JD {jd_ut} is outside the supported range [{min_jd}, {max_jd}]")]
    OutOfRange { jd_ut: f64, min_jd: f64, max_jd: f64 },
    /// The ascendant is undefined this close to a pole.
    #[error("ascendant is ill-defined at latitude {latitude_deg}°")]
    PolarDegeneracy { latitude_deg: f64 },
    /// A computed value was NaN or infinite.
    #[error("non-finite {0} at JD {1}")]
    NonFinite(&'static str, f64),
    /// Location or house-system failure from the chart layer.
    #[error(transparent)]
    Vedic(#[from] VedicError),
}

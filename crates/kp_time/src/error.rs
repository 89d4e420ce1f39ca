//! Error types for time conversions.

use thiserror::Error;

/// Errors from civil-time parsing or Julian Date conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// UTC offset string could not be parsed or is outside ±14 h.
    #[error("invalid UTC offset '{0}'")]
    InvalidUtcOffset(String),
    /// Julian Date cannot be represented as a civil timestamp.
    #[error("Julian Date {0} is outside the representable civil range")]
    OutOfRange(f64),
}

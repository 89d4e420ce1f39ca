//! Error types for ascendant search and horary resolution.

use std::fmt;

use kp_ephem::EphemerisError;
use kp_time::TimeError;
use kp_vedic_base::VedicError;
use thiserror::Error;

/// Errors from the ascendant search and the steps around it.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Horary number out of range, malformed table or bad location.
    #[error(transparent)]
    Vedic(#[from] VedicError),
    /// The ephemeris failed or returned a non-finite value.
    #[error("ephemeris unavailable at JD {jd_ut}: {reason}")]
    EphemerisUnavailable { jd_ut: f64, reason: String },
    /// No moment in the window puts the ascendant inside the target.
    #[error("ascendant never reaches the target in the window (closest approach {best_residual_deg:.6}°)")]
    NoSolutionFound { best_residual_deg: f64 },
    /// Search configuration or window rejected before any evaluation.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(&'static str),
    /// Civil-time conversion failed.
    #[error(transparent)]
    Time(#[from] TimeError),
}

impl SearchError {
    pub(crate) fn ephemeris(jd_ut: f64, err: &EphemerisError) -> Self {
        Self::EphemerisUnavailable {
            jd_ut,
            reason: err.to_string(),
        }
    }

    /// True for an invalid horary number.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::Vedic(VedicError::HoraryOutOfRange(_)))
    }
}

/// Step of [`crate::HoraryResolver::resolve`] at which a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveStage {
    /// Horary number lookup in the sub-division table.
    Lookup,
    /// Location and window validation.
    Request,
    /// Ascendant-time search.
    Search,
    /// Chart construction at the matched moment.
    Chart,
}

impl ResolveStage {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lookup => "lookup",
            Self::Request => "request",
            Self::Search => "search",
            Self::Chart => "chart",
        }
    }
}

impl fmt::Display for ResolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A [`SearchError`] tagged with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("horary {horary_number}: {stage} failed: {source}")]
pub struct ResolveError {
    pub horary_number: u32,
    pub stage: ResolveStage,
    #[source]
    pub source: SearchError,
}

impl ResolveError {
    pub(crate) fn at(horary_number: u32, stage: ResolveStage) -> impl FnOnce(SearchError) -> Self {
        move |source| Self {
            horary_number,
            stage,
            source,
        }
    }
}

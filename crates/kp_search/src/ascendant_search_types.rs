//! Types for the ascendant-time search.

use chrono::{FixedOffset, NaiveDate};
use kp_time::local_day_window;
use kp_vedic_base::{SubDivision, arc_forward, normalize_360, normalize_pm180};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Half-open arc `[start_deg, end_deg)` on the ecliptic, modulo 360.
///
/// Both ends are kept in [0, 360); `end_deg < start_deg` means the arc
/// crosses 0°, so `[355, 2)` and a division ending at 360 are handled
/// the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegreeInterval {
    pub start_deg: f64,
    pub end_deg: f64,
}

impl DegreeInterval {
    pub fn new(start_deg: f64, end_deg: f64) -> Result<Self, SearchError> {
        if !start_deg.is_finite() || !end_deg.is_finite() {
            return Err(SearchError::InvalidConfig("target interval bounds must be finite"));
        }
        let interval = Self {
            start_deg: normalize_360(start_deg),
            end_deg: normalize_360(end_deg),
        };
        if interval.start_deg == interval.end_deg {
            return Err(SearchError::InvalidConfig("target interval is empty"));
        }
        Ok(interval)
    }

    pub fn wraps(&self) -> bool {
        self.end_deg < self.start_deg
    }

    pub fn width_deg(&self) -> f64 {
        let w = arc_forward(self.start_deg, self.end_deg);
        if w == 0.0 { 360.0 } else { w }
    }

    /// Midpoint in [0, 360); the point the search aims for.
    pub fn midpoint_deg(&self) -> f64 {
        normalize_360(self.start_deg + self.width_deg() / 2.0)
    }

    pub fn contains(&self, deg: f64) -> bool {
        let d = normalize_360(deg);
        if self.wraps() {
            d >= self.start_deg || d < self.end_deg
        } else {
            d >= self.start_deg && d < self.end_deg
        }
    }

    /// Angular distance from `deg` to the nearest point of the arc; zero inside.
    pub fn distance_deg(&self, deg: f64) -> f64 {
        if self.contains(deg) {
            return 0.0;
        }
        arc_forward(deg, self.start_deg).min(arc_forward(self.end_deg, deg))
    }

    /// Angular distance from `deg` to the midpoint, in [0, 180].
    pub fn midpoint_residual_deg(&self, deg: f64) -> f64 {
        normalize_pm180(deg - self.midpoint_deg()).abs()
    }
}

impl From<&SubDivision> for DegreeInterval {
    fn from(d: &SubDivision) -> Self {
        Self {
            start_deg: normalize_360(d.start_deg),
            end_deg: normalize_360(d.end_deg),
        }
    }
}

/// Search window `[start_jd_ut, end_jd_ut]` in Julian Date UT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub start_jd_ut: f64,
    pub end_jd_ut: f64,
}

impl SearchWindow {
    pub fn new(start_jd_ut: f64, end_jd_ut: f64) -> Result<Self, SearchError> {
        let window = Self {
            start_jd_ut,
            end_jd_ut,
        };
        window.validate()?;
        Ok(window)
    }

    /// The 24 hours of a local civil day.
    pub fn local_day(date: NaiveDate, offset: FixedOffset) -> Result<Self, SearchError> {
        let (start, end) = local_day_window(date, offset)?;
        Self::new(start, end)
    }

    pub fn duration_days(&self) -> f64 {
        self.end_jd_ut - self.start_jd_ut
    }

    pub fn contains(&self, jd_ut: f64) -> bool {
        jd_ut >= self.start_jd_ut && jd_ut <= self.end_jd_ut
    }

    pub(crate) fn validate(&self) -> Result<(), SearchError> {
        if !self.start_jd_ut.is_finite() || !self.end_jd_ut.is_finite() {
            return Err(SearchError::InvalidConfig("window bounds must be finite"));
        }
        if self.end_jd_ut <= self.start_jd_ut {
            return Err(SearchError::InvalidConfig("window end must be after its start"));
        }
        Ok(())
    }
}

/// Tuning for [`crate::find_time`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AscendantSearchConfig {
    /// Coarse sampling step in days (default 2 minutes).
    pub step_days: f64,
    /// Bisection iteration cap, shared by re-verification rounds (default 60).
    pub max_iterations: u32,
    /// Angular tolerance around the target midpoint (default 1e-4°, 0.36″).
    pub tolerance_deg: f64,
    /// Step divisor used when re-sampling a suspect bracket (default 8).
    pub refine_factor: u32,
}

impl Default for AscendantSearchConfig {
    fn default() -> Self {
        Self {
            step_days: 2.0 / 1440.0,
            max_iterations: 60,
            tolerance_deg: 1e-4,
            refine_factor: 8,
        }
    }
}

impl AscendantSearchConfig {
    pub fn with_step_minutes(mut self, minutes: f64) -> Self {
        self.step_days = minutes / 1440.0;
        self
    }

    pub fn step_minutes(&self) -> f64 {
        self.step_days * 1440.0
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.step_days.is_finite() || self.step_days <= 0.0 {
            return Err("step_days must be positive");
        }
        // a larger step can skip a whole division and miss the crossing order
        if self.step_days > 1.0 / 24.0 {
            return Err("step_days must not exceed one hour");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.tolerance_deg.is_finite() || self.tolerance_deg <= 0.0 {
            return Err("tolerance_deg must be positive");
        }
        if self.refine_factor < 2 {
            return Err("refine_factor must be at least 2");
        }
        Ok(())
    }
}

/// Outcome of [`crate::find_time`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchResult {
    /// Matched moment, Julian Date UT.
    pub jd_ut: f64,
    /// Ascendant at `jd_ut`, degrees [0, 360).
    pub achieved_ascendant_deg: f64,
    /// Distance from the achieved ascendant to the target midpoint, or to
    /// the target itself (zero) when a coarse sample already inside it is
    /// returned without bisection.
    pub residual_deg: f64,
    /// Bisection steps taken.
    pub iterations_used: u32,
    /// Ascendant evaluations, coarse samples included.
    pub evaluations: u32,
    /// False only when the iteration cap ran out first; `jd_ut` is then the
    /// best point seen and may lie outside the target.
    pub converged: bool,
}

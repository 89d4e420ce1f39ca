//! Julian Date ↔ Gregorian calendar conversion.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 7.

/// Julian Date of the J2000.0 epoch (2000-Jan-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-Jan-01 00:00 UTC).
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Gregorian calendar date to Julian Date.
///
/// `day` may carry a fractional part for the time of day
/// (e.g. `1.5` = noon on the 1st).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Julian Date to Gregorian calendar `(year, month, fractional day)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian centuries since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Decimal year at mid-month, the argument convention of the ΔT polynomials.
pub fn decimal_year(jd: f64) -> f64 {
    let (year, month, _) = jd_to_calendar(jd);
    year as f64 + (month as f64 - 0.5) / 12.0
}

//! Civil timestamps with a fixed UTC offset.
//!
//! Horary questions are asked in local clock time; the search works in
//! Julian Date UT. Offsets are written the way practitioners write them
//! (`"+5:30"`, `"-03:00"`, `"+9"`, `"Z"`).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::TimeError;
use crate::julian::{JD_UNIX_EPOCH, SECONDS_PER_DAY};

const MAX_OFFSET_SECONDS: i32 = 14 * 3600;

/// Parse a UTC offset string into a [`FixedOffset`].
///
/// Accepts `±H`, `±H:MM`, `±HH:MM`, `±HHMM`, `Z` and `UTC`. A missing
/// sign means east of Greenwich.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset, TimeError> {
    let invalid = || TimeError::InvalidUtcOffset(s.to_string());
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, body) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        Some(_) => (1, trimmed),
        None => return Err(invalid()),
    };

    let (hours, minutes) = match body.split_once(':') {
        Some((h, m)) => (h, m),
        None if body.len() == 4 => body.split_at(2),
        None => (body, "0"),
    };
    if hours.is_empty() || minutes.is_empty() {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..60).contains(&minutes) || hours < 0 {
        return Err(invalid());
    }

    let total = sign * (hours * 3600 + minutes * 60);
    if total.abs() > MAX_OFFSET_SECONDS {
        return Err(invalid());
    }
    FixedOffset::east_opt(total).ok_or_else(invalid)
}

/// Render an offset as `+HH:MM`.
pub fn format_utc_offset(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let mins = secs.abs() / 60;
    format!("{sign}{:02}:{:02}", mins / 60, mins % 60)
}

/// Local civil time to Julian Date UT.
pub fn civil_to_jd_ut(local: NaiveDateTime, offset: FixedOffset) -> Result<f64, TimeError> {
    let dt = offset
        .from_local_datetime(&local)
        .single()
        .ok_or_else(|| TimeError::InvalidUtcOffset(format_utc_offset(offset)))?;
    Ok(datetime_to_jd_ut(&dt))
}

/// Any timezone-aware timestamp to Julian Date UT.
pub fn datetime_to_jd_ut<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let secs = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
    JD_UNIX_EPOCH + secs / SECONDS_PER_DAY
}

/// Julian Date UT to a civil timestamp in `offset`, rounded to the microsecond.
pub fn jd_ut_to_civil(jd_ut: f64, offset: FixedOffset) -> Result<DateTime<FixedOffset>, TimeError> {
    if !jd_ut.is_finite() {
        return Err(TimeError::OutOfRange(jd_ut));
    }
    let micros = ((jd_ut - JD_UNIX_EPOCH) * SECONDS_PER_DAY * 1e6).round();
    if micros.abs() > i64::MAX as f64 {
        return Err(TimeError::OutOfRange(jd_ut));
    }
    let utc = DateTime::<Utc>::from_timestamp_micros(micros as i64)
        .ok_or(TimeError::OutOfRange(jd_ut))?;
    Ok(utc.with_timezone(&offset))
}

/// Julian Date UT bounds `[start, end)` of a local calendar day.
pub fn local_day_window(date: NaiveDate, offset: FixedOffset) -> Result<(f64, f64), TimeError> {
    let start = civil_to_jd_ut(date.and_time(NaiveTime::MIN), offset)?;
    Ok((start, start + 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    #[test]
    fn parse_common_forms() {
        assert_eq!(parse_utc_offset("+5:30").unwrap(), ist());
        assert_eq!(parse_utc_offset("+05:30").unwrap(), ist());
        assert_eq!(parse_utc_offset("0530").unwrap(), ist());
        assert_eq!(parse_utc_offset("-3").unwrap().local_minus_utc(), -3 * 3600);
        assert_eq!(parse_utc_offset("-03:45").unwrap().local_minus_utc(), -(3 * 3600 + 45 * 60));
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset(" utc ").unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "+", "+5:", "+5:75", "abc", "+15:00", "+5:30:00", "--5"] {
            assert!(parse_utc_offset(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn format_roundtrip() {
        assert_eq!(format_utc_offset(ist()), "+05:30");
        let west = parse_utc_offset("-9:30").unwrap();
        assert_eq!(format_utc_offset(west), "-09:30");
    }

    #[test]
    fn j2000_noon_utc() {
        let local = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(17, 30, 0)
            .unwrap();
        let jd = civil_to_jd_ut(local, ist()).unwrap();
        assert!((jd - 2_451_545.0).abs() < 1e-9, "jd = {jd}");
    }

    #[test]
    fn local_day_window_shifts_by_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        let (start, end) = local_day_window(date, ist()).unwrap();
        // 2024-02-05 00:00 IST = 2024-02-04 18:30 UT
        let expected = crate::julian::calendar_to_jd(2024, 2, 4.0 + 18.5 / 24.0);
        assert!((start - expected).abs() < 1e-9);
        assert_eq!(end - start, 1.0);
    }

    #[test]
    fn jd_to_civil_recovers_clock_time() {
        let local = NaiveDate::from_ymd_opt(2024, 2, 5)
            .unwrap()
            .and_hms_opt(9, 41, 27)
            .unwrap();
        let jd = civil_to_jd_ut(local, ist()).unwrap();
        let back = jd_ut_to_civil(jd, ist()).unwrap();
        assert_eq!(back.offset(), &ist());
        assert_eq!((back.hour(), back.minute()), (9, 41));
        // f64 JD near 2.46e6 resolves ~40 µs
        let drift = (back.naive_local() - local).num_microseconds().unwrap().abs();
        assert!(drift < 100, "drift = {drift} µs");
    }

    #[test]
    fn non_finite_jd_is_rejected() {
        assert!(matches!(jd_ut_to_civil(f64::NAN, ist()), Err(TimeError::OutOfRange(_))));
    }
}

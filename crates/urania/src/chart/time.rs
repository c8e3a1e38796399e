use crate::chart::error::ResolutionError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Convert a civil date (`YYYY-MM-DD`) and clock time (`HH:MM` or `HH:MM:SS`)
/// in an IANA timezone to a UTC instant.
///
/// A clock time skipped by a DST transition is rejected; a repeated one
/// resolves to the earlier instant.
pub fn to_instant(date: &str, time: &str, timezone: &str) -> Result<DateTime<Utc>, ResolutionError> {
    let input = format!("{} {} {}", date.trim(), time.trim(), timezone);
    let invalid = |reason: String| ResolutionError::InvalidDateTime {
        input: input.clone(),
        reason,
    };

    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| invalid(format!("bad date: {}", e)))?;
    let clock = parse_clock(time.trim()).map_err(|e| invalid(format!("bad time: {}", e)))?;
    let tz = Tz::from_str(timezone).map_err(|_| invalid(format!("unknown timezone {}", timezone)))?;

    let local = NaiveDateTime::new(day, clock);
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| invalid(format!("{} does not exist in {}", local, tz)))
}

fn parse_clock(time: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(time, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
}

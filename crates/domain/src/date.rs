use chrono::{prelude::*, Duration, LocalResult};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDateError {
    #[error("Invalid date: {0}. Expected YYYY-MM-DD")]
    Malformed(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTimezoneError {
    #[error("Invalid timezone: {0}. Expected an IANA timezone name")]
    Unknown(String),
}

/// Parses a `YYYY-MM-DD` calendar date
pub fn parse_date(datestr: &str) -> Result<NaiveDate, InvalidDateError> {
    let malformed = || InvalidDateError::Malformed(datestr.to_string());
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(malformed());
    }
    let year = dates[0].parse::<i32>().map_err(|_| malformed())?;
    let month = dates[1].parse::<u32>().map_err(|_| malformed())?;
    let day = dates[2].parse::<u32>().map_err(|_| malformed())?;

    if !(1970..=2100).contains(&year) {
        return Err(malformed());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

pub fn parse_timezone(name: &str) -> Result<Tz, InvalidTimezoneError> {
    name.parse::<Tz>()
        .map_err(|_| InvalidTimezoneError::Unknown(name.to_string()))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The calendar date in `tz` at the given timestamp
pub fn local_date(ts: i64, tz: &Tz) -> NaiveDate {
    tz.timestamp_millis_opt(ts)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| utc_date(ts))
}

pub fn utc_date(ts: i64) -> NaiveDate {
    Utc.timestamp_millis_opt(ts)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

/// Timestamp of the wall clock time `hours:minutes` on `date` in `tz`.
/// Returns `None` for wall clock times skipped by a DST transition, and
/// the earliest instant for ambiguous ones.
pub fn local_timestamp(date: &NaiveDate, hours: u32, minutes: u32, tz: &Tz) -> Option<i64> {
    let naive = date.and_hms_opt(hours, minutes, 0)?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
        LocalResult::None => None,
    }
}

/// Millis of midnight UTC starting the given date
pub fn utc_midnight(date: &NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
        .timestamp_millis()
}

pub fn days_in_millis(days: i64) -> i64 {
    Duration::days(days).num_milliseconds()
}

pub fn hours_in_millis(hours: i64) -> i64 {
    Duration::hours(hours).num_milliseconds()
}

pub fn minutes_in_millis(minutes: i64) -> i64 {
    Duration::minutes(minutes).num_milliseconds()
}

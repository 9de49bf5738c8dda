use chrono::{prelude::*, Duration};
use serde_json::{json, Value};

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A UTC calendar date `days` days from today
pub fn date_in_days(days: i64) -> NaiveDate {
    (Utc::now() + Duration::days(days)).date_naive()
}

/// Millis of the given UTC wall clock time on `date`
pub fn utc_ts(date: &NaiveDate, hours: u32, minutes: u32) -> i64 {
    Utc.from_utc_datetime(&date.and_hms_opt(hours, minutes, 0).unwrap())
        .timestamp_millis()
}

/// Office hours from 09:00 to 17:00 on every weekday including weekends
pub fn every_day_office_hours() -> Value {
    let hours = json!([{ "start": "09:00", "end": "17:00" }]);
    json!({
        "monday": hours,
        "tuesday": hours,
        "wednesday": hours,
        "thursday": hours,
        "friday": hours,
        "saturday": hours,
        "sunday": hours,
    })
}

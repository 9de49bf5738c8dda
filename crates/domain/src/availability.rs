use chrono::Weekday;
use serde::{
    ser::{SerializeMap, SerializeStruct},
    Deserialize, Serialize,
};
use serde_json::Value;
use std::{collections::HashMap, fmt::Display, str::FromStr};
use thiserror::Error;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Lowercase english name of the weekday, which is also the key used
/// in the stored availability json
pub fn weekday_name(wday: Weekday) -> &'static str {
    match wday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn parse_weekday_name(name: &str) -> Option<Weekday> {
    WEEKDAYS.iter().copied().find(|w| weekday_name(*w) == name)
}

/// A wall clock time of day in `HH:MM` precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hours: u32,
    minutes: u32,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTimeOfDay {
    #[error("Invalid time format: {0}, expected HH:MM")]
    Format(String),
    #[error("Hour or minute out of range in time: {0}")]
    OutOfRange(String),
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(Self { hours, minutes })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(':').collect::<Vec<_>>();
        if parts.len() != 2 {
            return Err(InvalidTimeOfDay::Format(s.to_string()));
        }
        let hours = parts[0]
            .parse::<u32>()
            .map_err(|_| InvalidTimeOfDay::Format(s.to_string()))?;
        let minutes = parts[1]
            .parse::<u32>()
            .map_err(|_| InvalidTimeOfDay::Format(s.to_string()))?;

        Self::new(hours, minutes).ok_or_else(|| InvalidTimeOfDay::OutOfRange(s.to_string()))
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// An open interval on a weekday during which a `Lawyer` accepts bookings.
/// `start` is always strictly before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityInterval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl AvailabilityInterval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Whether `[start, end]` lies completely inside this interval
    pub fn contains(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.start <= start && end <= self.end
    }

    fn from_json(value: &Value) -> Option<Self> {
        let start = value.get("start")?.as_str()?.parse::<TimeOfDay>().ok()?;
        let end = value.get("end")?.as_str()?.parse::<TimeOfDay>().ok()?;
        Self::new(start, end)
    }
}

impl Serialize for AvailabilityInterval {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AvailabilityInterval", 2)?;
        state.serialize_field("start", &self.start.to_string())?;
        state.serialize_field("end", &self.end.to_string())?;
        state.end()
    }
}

/// The weekly schedule a `Lawyer` declares as bookable.
///
/// It is stored as json of the form
/// `{"monday": [{"start": "09:00", "end": "12:00"}], ...}`.
/// Producers of that json are not validated, so parsing is lenient:
/// unknown day keys, day values that are not lists and intervals with a
/// missing or malformed `start` / `end`, an out of range hour or minute,
/// or `start >= end` are dropped. The rest of the schedule is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyAvailability {
    days: HashMap<Weekday, Vec<AvailabilityInterval>>,
}

impl WeeklyAvailability {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_json(value: &Value) -> Self {
        let mut availability = Self::new();
        let days = match value.as_object() {
            Some(days) => days,
            None => return availability,
        };

        for (day, intervals) in days {
            let wday = match parse_weekday_name(day) {
                Some(wday) => wday,
                None => continue,
            };
            let intervals = match intervals.as_array() {
                Some(intervals) => intervals,
                None => continue,
            };
            let parsed = intervals
                .iter()
                .filter_map(AvailabilityInterval::from_json)
                .collect::<Vec<_>>();
            if !parsed.is_empty() {
                availability.days.insert(wday, parsed);
            }
        }

        availability
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn set_intervals(&mut self, wday: Weekday, intervals: Vec<AvailabilityInterval>) {
        if intervals.is_empty() {
            self.days.remove(&wday);
        } else {
            self.days.insert(wday, intervals);
        }
    }

    pub fn intervals(&self, wday: Weekday) -> &[AvailabilityInterval] {
        self.days.get(&wday).map(|i| i.as_slice()).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether some interval on the weekday fully contains `[start, end]`
    pub fn covers(&self, wday: Weekday, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.intervals(wday)
            .iter()
            .any(|interval| interval.contains(start, end))
    }
}

impl Serialize for WeeklyAvailability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for wday in WEEKDAYS.iter() {
            if let Some(intervals) = self.days.get(wday) {
                map.serialize_entry(weekday_name(*wday), intervals)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeeklyAvailability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

use crate::{
    availability::{TimeOfDay, WeeklyAvailability},
    date::{hours_in_millis, local_date, local_timestamp, minutes_in_millis},
    timespan::TimeSpan,
};
use chrono::prelude::*;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Length of every bookable slot
pub const SLOT_DURATION_MINUTES: u32 = 30;
/// Local hour of the first candidate slot of a day
pub const FIRST_SLOT_HOUR: u32 = 9;
/// Local hour at which the last candidate slot of a day ends
pub const LAST_SLOT_END_HOUR: u32 = 17;
/// Slots starting sooner than this after now are never offered
pub const SLOT_MIN_LEAD_HOURS: i64 = 48;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimeSlot {
    /// Local wall clock start of the slot formatted as `HH:MM`
    pub time: String,
    pub available: bool,
}

impl TimeSlot {
    fn new(time: TimeOfDay, available: bool) -> Self {
        Self {
            time: time.to_string(),
            available,
        }
    }
}

/// The fixed candidate start times of a day: 09:00, 09:30, .. 16:30
pub fn candidate_slot_times() -> Vec<TimeOfDay> {
    let first = FIRST_SLOT_HOUR * 60;
    let last = LAST_SLOT_END_HOUR * 60;
    (first..last)
        .step_by(SLOT_DURATION_MINUTES as usize)
        .filter_map(|minutes| TimeOfDay::new(minutes / 60, minutes % 60))
        .collect()
}

fn slot_end(start: TimeOfDay) -> Option<TimeOfDay> {
    let end = start.minutes_since_midnight() + SLOT_DURATION_MINUTES;
    TimeOfDay::new(end / 60, end % 60)
}

/// Whether `date` lies strictly before the current date in `tz`
pub fn is_past_date(date: &NaiveDate, now: i64, tz: &Tz) -> bool {
    *date < local_date(now, tz)
}

/// All candidate slots marked unavailable
pub fn unavailable_slots() -> Vec<TimeSlot> {
    candidate_slot_times()
        .into_iter()
        .map(|time| TimeSlot::new(time, false))
        .collect()
}

pub struct TimeSlotsOptions<'a> {
    /// The local calendar date to generate slots for
    pub date: NaiveDate,
    pub tz: Tz,
    pub now: i64,
    pub availability: &'a WeeklyAvailability,
    /// Spans occupied by the `Appointment`s of the `Lawyer` that still
    /// block time, i.e. neither cancelled nor rejected
    pub booked: &'a [TimeSpan],
}

/// Generates the candidate slots of `date` in ascending order.
///
/// A slot is available only when it lies inside a declared interval
/// of the weekday, starts at least `SLOT_MIN_LEAD_HOURS` after now
/// and does not overlap any booked span.
pub fn get_time_slots(options: &TimeSlotsOptions) -> Vec<TimeSlot> {
    if is_past_date(&options.date, options.now, &options.tz) {
        return unavailable_slots();
    }

    let today = local_date(options.now, &options.tz);
    let wday = options.date.weekday();
    let earliest_start = options.now + hours_in_millis(SLOT_MIN_LEAD_HOURS);
    let duration = minutes_in_millis(SLOT_DURATION_MINUTES as i64);

    candidate_slot_times()
        .into_iter()
        .map(|time| {
            let covered = match slot_end(time) {
                Some(end) => options.availability.covers(wday, time, end),
                None => false,
            };
            if !covered {
                return TimeSlot::new(time, false);
            }

            // Wall clock times skipped by a DST transition can not be booked
            let start_ts =
                match local_timestamp(&options.date, time.hours(), time.minutes(), &options.tz) {
                    Some(ts) => ts,
                    None => return TimeSlot::new(time, false),
                };
            let span = TimeSpan::new(start_ts, start_ts + duration);

            let available = !(options.date == today && start_ts < options.now)
                && start_ts >= earliest_start
                && !options.booked.iter().any(|booked| booked.overlaps(&span));

            TimeSlot::new(time, available)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn monday_mornings() -> WeeklyAvailability {
        WeeklyAvailability::from_json(&json!({
            "monday": [{ "start": "09:00", "end": "12:00" }]
        }))
    }

    // 2024-06-03 is a monday
    fn next_monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn available_times(slots: &[TimeSlot]) -> Vec<&str> {
        slots
            .iter()
            .filter(|s| s.available)
            .map(|s| s.time.as_str())
            .collect()
    }

    #[test]
    fn generates_sixteen_candidates() {
        let times = candidate_slot_times()
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>();
        assert_eq!(times.len(), 16);
        assert_eq!(times[0], "09:00");
        assert_eq!(times[1], "09:30");
        assert_eq!(times[15], "16:30");
    }

    #[test]
    fn offers_slots_inside_declared_hours() {
        let availability = monday_mornings();
        let slots = get_time_slots(&TimeSlotsOptions {
            date: next_monday(),
            tz: chrono_tz::Asia::Tokyo,
            now: utc(2024, 5, 29, 0, 0),
            availability: &availability,
            booked: &[],
        });

        assert_eq!(slots.len(), 16);
        assert_eq!(
            available_times(&slots),
            vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"]
        );
        assert!(slots[6..].iter().all(|s| !s.available));
    }

    #[test]
    fn booked_spans_block_overlapping_slots() {
        let availability = monday_mornings();
        // 10:00 - 11:00 in Tokyo
        let booked = vec![TimeSpan::new(utc(2024, 6, 3, 1, 0), utc(2024, 6, 3, 2, 0))];
        let slots = get_time_slots(&TimeSlotsOptions {
            date: next_monday(),
            tz: chrono_tz::Asia::Tokyo,
            now: utc(2024, 5, 29, 0, 0),
            availability: &availability,
            booked: &booked,
        });

        assert_eq!(
            available_times(&slots),
            vec!["09:00", "09:30", "11:00", "11:30"]
        );
    }

    #[test]
    fn past_dates_are_fully_unavailable() {
        let availability = monday_mornings();
        let slots = get_time_slots(&TimeSlotsOptions {
            date: next_monday(),
            tz: chrono_tz::Asia::Tokyo,
            now: utc(2024, 6, 10, 0, 0),
            availability: &availability,
            booked: &[],
        });
        assert_eq!(slots, unavailable_slots());
        assert_eq!(slots.len(), 16);
    }

    #[test]
    fn past_date_depends_on_timezone() {
        // 2024-06-03T20:00Z is already June 4th in Tokyo but still June 3rd in UTC
        let now = utc(2024, 6, 3, 20, 0);
        assert!(is_past_date(&next_monday(), now, &chrono_tz::Asia::Tokyo));
        assert!(!is_past_date(&next_monday(), now, &chrono_tz::UTC));
    }

    #[test]
    fn weekday_without_intervals_is_fully_unavailable() {
        let availability = monday_mornings();
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
        let slots = get_time_slots(&TimeSlotsOptions {
            date: tuesday,
            tz: chrono_tz::Asia::Tokyo,
            now: utc(2024, 5, 29, 0, 0),
            availability: &availability,
            booked: &[],
        });
        assert!(slots.iter().all(|s| !s.available));
        assert_eq!(slots.len(), 16);
    }

    #[test]
    fn slots_within_lead_time_are_unavailable() {
        let availability = monday_mornings();
        // Exactly 48 hours before 10:00 Tokyo time on monday
        let now = utc(2024, 6, 1, 1, 0);
        let slots = get_time_slots(&TimeSlotsOptions {
            date: next_monday(),
            tz: chrono_tz::Asia::Tokyo,
            now,
            availability: &availability,
            booked: &[],
        });
        assert_eq!(
            available_times(&slots),
            vec!["10:00", "10:30", "11:00", "11:30"]
        );
    }

    #[test]
    fn todays_slots_are_never_available() {
        let availability = monday_mornings();
        let now = utc(2024, 6, 2, 23, 0);
        let slots = get_time_slots(&TimeSlotsOptions {
            date: next_monday(),
            tz: chrono_tz::Asia::Tokyo,
            now,
            availability: &availability,
            booked: &[],
        });
        assert!(slots.iter().all(|s| !s.available));
    }

    #[test]
    fn available_slots_never_overlap_booked_spans() {
        let availability = WeeklyAvailability::from_json(&json!({
            "monday": [{ "start": "09:00", "end": "17:00" }]
        }));
        let booked = vec![
            TimeSpan::new(utc(2024, 6, 3, 0, 15), utc(2024, 6, 3, 0, 45)),
            TimeSpan::new(utc(2024, 6, 3, 3, 0), utc(2024, 6, 3, 5, 10)),
        ];
        let date = next_monday();
        let tz = chrono_tz::Asia::Tokyo;
        let slots = get_time_slots(&TimeSlotsOptions {
            date,
            tz,
            now: utc(2024, 5, 1, 0, 0),
            availability: &availability,
            booked: &booked,
        });

        for slot in slots.iter().filter(|s| s.available) {
            let time = slot.time.parse::<TimeOfDay>().unwrap();
            let start = local_timestamp(&date, time.hours(), time.minutes(), &tz).unwrap();
            let span = TimeSpan::new(start, start + minutes_in_millis(30));
            assert!(booked.iter().all(|b| !b.overlaps(&span)));
        }
        assert_eq!(available_times(&slots).len(), 16 - 2 - 5);
    }
}

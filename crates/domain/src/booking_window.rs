use crate::date::{days_in_millis, utc_date, utc_midnight};
use thiserror::Error;

/// Full days that must pass after tomorrow before a new `Appointment` may start
pub const CREATION_LEAD_DAYS: i64 = 2;
/// Days before the start after which a client can no longer cancel
pub const CANCELLATION_CUTOFF_DAYS: i64 = 2;

#[derive(Error, Debug, PartialEq)]
pub enum BookingWindowError {
    #[error("Appointments must be booked no earlier than 2 full days after tomorrow. The earliest possible start is: {0}")]
    TooShortNotice(i64),
    #[error("Appointments can only be cancelled up until 2 days before they start")]
    PastCancellationCutoff,
}

/// Midnight UTC of the day after `now` plus `CREATION_LEAD_DAYS`
pub fn earliest_bookable_start(now: i64) -> i64 {
    utc_midnight(&utc_date(now)) + days_in_millis(1 + CREATION_LEAD_DAYS)
}

pub fn validate_creation_lead_time(start_ts: i64, now: i64) -> Result<(), BookingWindowError> {
    let earliest = earliest_bookable_start(now);
    if start_ts < earliest {
        return Err(BookingWindowError::TooShortNotice(earliest));
    }
    Ok(())
}

/// Clients may cancel only while `now` is strictly before `start - CANCELLATION_CUTOFF_DAYS`
pub fn validate_cancellation_cutoff(start_ts: i64, now: i64) -> Result<(), BookingWindowError> {
    if now < start_ts - days_in_millis(CANCELLATION_CUTOFF_DAYS) {
        Ok(())
    } else {
        Err(BookingWindowError::PastCancellationCutoff)
    }
}

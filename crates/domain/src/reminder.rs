use crate::{
    appointment::{Appointment, AppointmentStatus},
    date::{hours_in_millis, minutes_in_millis},
};
use serde::{Deserialize, Serialize};

/// The two reminders sent ahead of an `Appointment`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    /// Sent when the `Appointment` starts in roughly one day
    Day,
    /// Sent when the `Appointment` starts in roughly one hour
    Hour,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }

    /// The exclusive bounds of the time left until the start in which
    /// this reminder is due
    fn window(&self) -> (i64, i64) {
        match self {
            Self::Day => (hours_in_millis(23), hours_in_millis(25)),
            Self::Hour => (minutes_in_millis(55), minutes_in_millis(65)),
        }
    }

    fn is_sent(&self, appointment: &Appointment) -> bool {
        match self {
            Self::Day => appointment.day_reminder_sent,
            Self::Hour => appointment.hour_reminder_sent,
        }
    }
}

fn receives_reminders(status: AppointmentStatus) -> bool {
    !matches!(
        status,
        AppointmentStatus::Rejected | AppointmentStatus::Cancelled | AppointmentStatus::Completed
    )
}

/// The reminder that should be sent for the `Appointment` at `now`, if any.
/// The windows are disjoint so at most one reminder is due at a time.
pub fn due_reminder(appointment: &Appointment, now: i64) -> Option<ReminderKind> {
    if !receives_reminders(appointment.status) || appointment.start_ts <= now {
        return None;
    }
    let until = appointment.start_ts - now;

    [ReminderKind::Day, ReminderKind::Hour]
        .iter()
        .copied()
        .find(|kind| {
            let (lower, upper) = kind.window();
            !kind.is_sent(appointment) && lower < until && until < upper
        })
}

mod appointment;
mod availability;
pub mod booking_slots;
pub mod booking_window;
pub mod date;
mod lawyer;
mod notification;
mod reminder;
mod shared;
mod timespan;
mod user;

pub use appointment::{Appointment, AppointmentStatus, InvalidStatusError};
pub use availability::{
    weekday_name, AvailabilityInterval, InvalidTimeOfDay, TimeOfDay, WeeklyAvailability,
};
pub use lawyer::Lawyer;
pub use notification::{Notification, NotificationKind};
pub use reminder::{due_reminder, ReminderKind};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use timespan::TimeSpan;
pub use user::Role;

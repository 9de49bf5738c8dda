use crate::{
    appointment::{Appointment, AppointmentStatus},
    reminder::ReminderKind,
    shared::entity::ID,
    user::Role,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum NotificationKind {
    /// A client booked a new `Appointment` with the `Lawyer`
    NewAppointment,
    StatusChanged { status: AppointmentStatus },
    Rejected { reason: String },
    Reminder { reminder: ReminderKind },
}

/// A message about an `Appointment` that should be delivered to a user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// The user account receiving the message
    pub recipient_id: ID,
    pub recipient_role: Role,
    pub appointment_id: ID,
    pub lawyer_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(
        recipient_id: ID,
        recipient_role: Role,
        appointment: &Appointment,
        kind: NotificationKind,
    ) -> Self {
        Self {
            recipient_id,
            recipient_role,
            appointment_id: appointment.id.clone(),
            lawyer_id: appointment.lawyer_id.clone(),
            start_ts: appointment.start_ts,
            end_ts: appointment.end_ts,
            kind,
        }
    }

    pub fn for_client(appointment: &Appointment, kind: NotificationKind) -> Self {
        Self::new(appointment.client_id.clone(), Role::Client, appointment, kind)
    }

    /// `lawyer_user_id` is the user account of the `Lawyer` of the `Appointment`
    pub fn for_lawyer(lawyer_user_id: ID, appointment: &Appointment, kind: NotificationKind) -> Self {
        Self::new(lawyer_user_id, Role::Lawyer, appointment, kind)
    }
}

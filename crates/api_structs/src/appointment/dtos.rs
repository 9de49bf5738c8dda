use lawyer_booking_domain::{Appointment, AppointmentStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDTO {
    pub id: ID,
    pub client_id: ID,
    pub lawyer_id: ID,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: i64,
    pub status: AppointmentStatus,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub chat_enabled: bool,
    pub reject_reason: Option<String>,
    pub cancel_reason: Option<String>,
    pub admin_reason: Option<String>,
    pub day_reminder_sent: bool,
    pub hour_reminder_sent: bool,
    pub created: i64,
    pub updated: i64,
}

impl AppointmentDTO {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            client_id: appointment.client_id,
            lawyer_id: appointment.lawyer_id,
            description: appointment.description,
            start_ts: appointment.start_ts,
            end_ts: appointment.end_ts,
            status: appointment.status,
            meeting_link: appointment.meeting_link,
            notes: appointment.notes,
            chat_enabled: appointment.chat_enabled,
            reject_reason: appointment.reject_reason,
            cancel_reason: appointment.cancel_reason,
            admin_reason: appointment.admin_reason,
            day_reminder_sent: appointment.day_reminder_sent,
            hour_reminder_sent: appointment.hour_reminder_sent,
            created: appointment.created,
            updated: appointment.updated,
        }
    }
}

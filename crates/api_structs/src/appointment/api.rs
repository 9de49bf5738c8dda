use crate::dtos::AppointmentDTO;
use lawyer_booking_domain::{Appointment, AppointmentStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub appointment: AppointmentDTO,
}

impl AppointmentResponse {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            appointment: AppointmentDTO::new(appointment),
        }
    }
}

pub mod get_available_time_slots {
    use super::*;
    use lawyer_booking_domain::booking_slots::TimeSlot;

    #[derive(Serialize, Deserialize)]
    pub struct QueryParams {
        pub lawyer_id: ID,
        /// Local date formatted as `YYYY-MM-DD`
        pub date: String,
        /// IANA timezone name. Defaults to the timezone configured on the server
        #[serde(default)]
        pub timezone: Option<String>,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub date: String,
        pub timezone: String,
        pub slots: Vec<TimeSlot>,
    }
}

pub mod create_appointment {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub lawyer_id: ID,
        pub start_ts: i64,
        pub end_ts: i64,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod get_appointment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub appointment_id: ID,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod update_appointment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub appointment_id: ID,
    }

    #[derive(Debug, Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub start_ts: Option<i64>,
        #[serde(default)]
        pub end_ts: Option<i64>,
        #[serde(default)]
        pub status: Option<AppointmentStatus>,
        #[serde(default)]
        pub meeting_link: Option<String>,
        #[serde(default)]
        pub notes: Option<String>,
        #[serde(default)]
        pub chat_enabled: Option<bool>,
        #[serde(default)]
        pub cancel_reason: Option<String>,
        #[serde(default)]
        pub admin_reason: Option<String>,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod reject_appointment {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub appointment_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reason: String,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod get_upcoming_appointments {
    use super::*;

    #[derive(Serialize, Deserialize, Default)]
    pub struct QueryParams {
        #[serde(default)]
        pub page: Option<i64>,
        #[serde(default)]
        pub limit: Option<i64>,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub appointments: Vec<AppointmentDTO>,
        pub page: i64,
        pub limit: i64,
    }

    impl APIResponse {
        pub fn new(appointments: Vec<Appointment>, page: i64, limit: i64) -> Self {
            Self {
                appointments: appointments.into_iter().map(AppointmentDTO::new).collect(),
                page,
                limit,
            }
        }
    }
}

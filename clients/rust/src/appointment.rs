use crate::{APIResponse, BaseClient};
use lawyer_booking_api_structs::*;
use lawyer_booking_domain::{AppointmentStatus, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppointmentClient {
    base: Arc<BaseClient>,
}

pub struct GetAvailableSlotsInput {
    pub lawyer_id: ID,
    /// Local date formatted as `YYYY-MM-DD`
    pub date: String,
    pub timezone: Option<String>,
}

pub struct CreateAppointmentInput {
    pub lawyer_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    pub description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Default)]
pub struct UpdateAppointmentInput {
    pub appointment_id: ID,
    pub description: Option<String>,
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub chat_enabled: Option<bool>,
    pub cancel_reason: Option<String>,
    pub admin_reason: Option<String>,
}

pub struct RejectAppointmentInput {
    pub appointment_id: ID,
    pub reason: String,
}

#[derive(Default)]
pub struct GetUpcomingAppointmentsInput {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl GetUpcomingAppointmentsInput {
    fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(format!("page={}", page));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }
        params.join("&")
    }
}

impl AppointmentClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_available_slots(
        &self,
        input: GetAvailableSlotsInput,
    ) -> APIResponse<get_available_time_slots::APIResponse> {
        let mut path = format!(
            "appointments/available-slots?lawyer_id={}&date={}",
            input.lawyer_id, input.date
        );
        if let Some(timezone) = input.timezone {
            path.push_str(&format!("&timezone={}", timezone));
        }
        self.base.get(path, StatusCode::OK).await
    }

    pub async fn create(
        &self,
        input: CreateAppointmentInput,
    ) -> APIResponse<create_appointment::APIResponse> {
        let body = create_appointment::RequestBody {
            lawyer_id: input.lawyer_id,
            start_ts: input.start_ts,
            end_ts: input.end_ts,
            description: input.description,
            notes: input.notes,
        };
        self.base
            .post(body, "appointments".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, appointment_id: ID) -> APIResponse<get_appointment::APIResponse> {
        self.base
            .get(format!("appointments/{}", appointment_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateAppointmentInput,
    ) -> APIResponse<update_appointment::APIResponse> {
        let body = update_appointment::RequestBody {
            description: input.description,
            start_ts: input.start_ts,
            end_ts: input.end_ts,
            status: input.status,
            meeting_link: input.meeting_link,
            notes: input.notes,
            chat_enabled: input.chat_enabled,
            cancel_reason: input.cancel_reason,
            admin_reason: input.admin_reason,
        };
        self.base
            .put(
                body,
                format!("appointments/{}", input.appointment_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn reject(
        &self,
        input: RejectAppointmentInput,
    ) -> APIResponse<reject_appointment::APIResponse> {
        let body = reject_appointment::RequestBody {
            reason: input.reason,
        };
        self.base
            .post(
                body,
                format!("appointments/{}/reject", input.appointment_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_upcoming(
        &self,
        input: GetUpcomingAppointmentsInput,
    ) -> APIResponse<get_upcoming_appointments::APIResponse> {
        self.base
            .get(
                format!("appointments/upcoming?{}", input.to_query_string()),
                StatusCode::OK,
            )
            .await
    }
}

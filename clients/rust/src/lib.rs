mod appointment;
mod base;
mod jobs;
mod lawyer;
mod status;

use appointment::AppointmentClient;
pub use appointment::{
    CreateAppointmentInput, GetAvailableSlotsInput, GetUpcomingAppointmentsInput,
    RejectAppointmentInput, UpdateAppointmentInput,
};
pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use jobs::JobsClient;
use lawyer::LawyerClient;
pub use lawyer::{CheckAvailabilityInput, CreateLawyerInput, UpdateLawyerAvailabilityInput};
pub use lawyer_booking_api_structs::dtos::*;
pub use lawyer_booking_domain::{booking_slots::TimeSlot, AppointmentStatus, Role, ID};
pub use reqwest::StatusCode;
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use lawyer_booking_api_structs::dtos::AppointmentDTO as Appointment;
pub use lawyer_booking_api_structs::dtos::LawyerDTO as Lawyer;

/// Lawyer Booking Server SDK
///
/// The SDK contains methods for interacting with the lawyer booking server
/// API.
#[derive(Clone)]
pub struct BookingSDK {
    pub appointment: AppointmentClient,
    pub jobs: JobsClient,
    pub lawyer: LawyerClient,
    pub status: StatusClient,
}

impl BookingSDK {
    /// Client without a signed in user. Only public routes are accessible.
    pub fn new<T: Into<String>>(address: T) -> Self {
        Self::from_base(BaseClient::new(address.into()))
    }

    /// Client acting as the given user
    pub fn with_identity<T: Into<String>>(address: T, user_id: ID, role: Role) -> Self {
        let mut base = BaseClient::new(address.into());
        base.set_identity(user_id, role);
        Self::from_base(base)
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let appointment = AppointmentClient::new(base.clone());
        let jobs = JobsClient::new(base.clone());
        let lawyer = LawyerClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            appointment,
            jobs,
            lawyer,
            status,
        }
    }
}

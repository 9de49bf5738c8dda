use super::subscribers::NotifyLawyerOnAppointmentCreated;
use crate::{
    error::ApiError,
    lawyer::CheckAvailabilityUseCase,
    shared::{
        auth::{protect_route, Actor, Permission},
        usecase::{execute_with_policy, PermissionBoundary, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use lawyer_booking_api_structs::create_appointment::*;
use lawyer_booking_domain::{
    booking_window::validate_creation_lead_time, Appointment, Lawyer, TimeSpan, ID,
};
use lawyer_booking_infra::BookingContext;

pub async fn create_appointment_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let (actor, policy) = protect_route(&http_req)?;

    let body = body.0;
    let usecase = CreateAppointmentUseCase {
        actor,
        lawyer_id: body.lawyer_id,
        start_ts: body.start_ts,
        end_ts: body.end_ts,
        description: body.description,
        notes: body.notes,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.appointment)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CreateAppointmentUseCase {
    /// The client booking the `Appointment`
    pub actor: Actor,
    pub lawyer_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    pub description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidTimespan,
    TooShortNotice(String),
    LawyerNotFound(ID),
    NotAvailable,
    Storage,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The startTs must be before the endTs".into())
            }
            UseCaseError::TooShortNotice(msg) => Self::PolicyViolation(msg),
            UseCaseError::LawyerNotFound(lawyer_id) => Self::NotFound(format!(
                "The lawyer with id: {}, was not found.",
                lawyer_id
            )),
            UseCaseError::NotAvailable => Self::Conflict(
                "The lawyer already has an appointment in the requested time".into(),
            ),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub appointment: Appointment,
    pub lawyer: Lawyer,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAppointmentUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAppointment";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        let timespan = TimeSpan::new(self.start_ts, self.end_ts);
        if !timespan.is_valid() {
            return Err(UseCaseError::InvalidTimespan);
        }
        let now = ctx.sys.get_timestamp_millis();
        validate_creation_lead_time(self.start_ts, now)
            .map_err(|e| UseCaseError::TooShortNotice(e.to_string()))?;

        let lawyer = ctx
            .repos
            .lawyers
            .find(&self.lawyer_id)
            .await
            .ok_or_else(|| UseCaseError::LawyerNotFound(self.lawyer_id.clone()))?;

        let available = CheckAvailabilityUseCase {
            lawyer_id: lawyer.id.clone(),
            timespan,
        }
        .execute(ctx)
        .await
        .map_err(|_| UseCaseError::Storage)?;
        if !available {
            return Err(UseCaseError::NotAvailable);
        }

        let mut appointment = Appointment::new(
            self.actor.user_id.clone(),
            lawyer.id.clone(),
            self.start_ts,
            self.end_ts,
            now,
        );
        appointment.description = self.description.clone();
        appointment.notes = self.notes.clone();

        ctx.repos
            .appointments
            .insert(&appointment)
            .await
            .map_err(|_| UseCaseError::Storage)?;

        Ok(UseCaseRes {
            appointment,
            lawyer,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyLawyerOnAppointmentCreated)]
    }
}

impl PermissionBoundary for CreateAppointmentUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CreateAppointment]
    }
}

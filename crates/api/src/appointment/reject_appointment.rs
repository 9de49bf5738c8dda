use super::subscribers::NotifyClientOnAppointmentRejected;
use crate::{
    error::ApiError,
    shared::{
        auth::{protect_route, Actor, Permission},
        usecase::{execute_with_policy, PermissionBoundary, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use lawyer_booking_api_structs::reject_appointment::*;
use lawyer_booking_domain::{Appointment, AppointmentStatus, ID};
use lawyer_booking_infra::BookingContext;

pub async fn reject_appointment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let (actor, policy) = protect_route(&http_req)?;

    let usecase = RejectAppointmentUseCase {
        actor,
        appointment_id: path_params.appointment_id.clone(),
        reason: body.0.reason,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|appointment| HttpResponse::Ok().json(APIResponse::new(appointment)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct RejectAppointmentUseCase {
    pub actor: Actor,
    pub appointment_id: ID,
    pub reason: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    MissingReason,
    NotFound(ID),
    NotOwner,
    AlreadyClosed(AppointmentStatus),
    Storage,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingReason => {
                Self::BadClientData("A reason is required to reject an appointment".into())
            }
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "The appointment with id: {}, was not found.",
                id
            )),
            UseCaseError::NotOwner => {
                Self::Forbidden("Lawyers can only reject their own appointments".into())
            }
            UseCaseError::AlreadyClosed(status) => Self::BadClientData(format!(
                "An appointment with status {} can not be rejected",
                status
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RejectAppointmentUseCase {
    type Response = Appointment;

    type Error = UseCaseError;

    const NAME: &'static str = "RejectAppointment";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(UseCaseError::MissingReason);
        }

        let mut appointment = ctx
            .repos
            .appointments
            .find(&self.appointment_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.appointment_id.clone()))?;
        if !self.actor.is_admin() {
            let lawyer = ctx.repos.lawyers.find(&appointment.lawyer_id).await;
            match lawyer {
                Some(lawyer) if lawyer.user_id == self.actor.user_id => (),
                _ => return Err(UseCaseError::NotOwner),
            }
        }
        if !appointment.status.is_active() {
            return Err(UseCaseError::AlreadyClosed(appointment.status));
        }

        appointment.status = AppointmentStatus::Rejected;
        appointment.reject_reason = Some(reason.to_string());
        appointment.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .appointments
            .save(&appointment)
            .await
            .map(|_| appointment)
            .map_err(|_| UseCaseError::Storage)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyClientOnAppointmentRejected)]
    }
}

impl PermissionBoundary for RejectAppointmentUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::RejectAppointment]
    }
}

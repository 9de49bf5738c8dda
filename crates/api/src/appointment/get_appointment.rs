use crate::{
    error::ApiError,
    shared::{
        auth::{protect_route, Actor, Permission},
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use lawyer_booking_api_structs::get_appointment::*;
use lawyer_booking_domain::{Appointment, Role, ID};
use lawyer_booking_infra::BookingContext;

pub async fn get_appointment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let (actor, policy) = protect_route(&http_req)?;

    let usecase = GetAppointmentUseCase {
        actor,
        appointment_id: path_params.appointment_id.clone(),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|appointment| HttpResponse::Ok().json(APIResponse::new(appointment)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetAppointmentUseCase {
    pub actor: Actor,
    pub appointment_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "The appointment with id: {}, was not found.",
                id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAppointmentUseCase {
    type Response = Appointment;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAppointment";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        let appointment = ctx
            .repos
            .appointments
            .find(&self.appointment_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.appointment_id.clone()))?;

        let visible = match self.actor.role {
            Role::Admin => true,
            Role::Client => appointment.client_id == self.actor.user_id,
            Role::Lawyer => ctx
                .repos
                .lawyers
                .find(&appointment.lawyer_id)
                .await
                .map(|lawyer| lawyer.user_id == self.actor.user_id)
                .unwrap_or(false),
        };
        // Appointments of other users are reported as missing
        if !visible {
            return Err(UseCaseError::NotFound(self.appointment_id.clone()));
        }

        Ok(appointment)
    }
}

impl PermissionBoundary for GetAppointmentUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ReadAppointment]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use lawyer_booking_domain::Lawyer;

    #[actix_web::main]
    #[test]
    async fn only_participants_and_admins_see_appointment() {
        let ctx = BookingContext::create_inmemory();
        let lawyer = Lawyer::new(ID::new(), "A".into(), "a@b.c".into(), "O".into(), 0);
        ctx.repos.lawyers.insert(&lawyer).await.unwrap();
        let appointment = Appointment::new(ID::new(), lawyer.id.clone(), 100, 200, 0);
        ctx.repos.appointments.insert(&appointment).await.unwrap();

        let get = |actor: Actor| GetAppointmentUseCase {
            actor,
            appointment_id: appointment.id.clone(),
        };
        let visible_to = vec![
            Actor::new(appointment.client_id.clone(), Role::Client),
            Actor::new(lawyer.user_id.clone(), Role::Lawyer),
            Actor::new(ID::new(), Role::Admin),
        ];
        for actor in visible_to {
            assert_eq!(get(actor).execute(&ctx).await.unwrap(), appointment);
        }
        let hidden_from = vec![
            Actor::new(ID::new(), Role::Client),
            Actor::new(ID::new(), Role::Lawyer),
        ];
        for actor in hidden_from {
            assert!(matches!(
                get(actor).execute(&ctx).await,
                Err(UseCaseError::NotFound(_))
            ));
        }
    }
}

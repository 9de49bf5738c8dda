use crate::{
    error::ApiError,
    shared::{
        auth::{protect_route, Actor, Permission},
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use lawyer_booking_api_structs::get_upcoming_appointments::*;
use lawyer_booking_domain::{Appointment, Role};
use lawyer_booking_infra::{BookingContext, Participant, UpcomingAppointmentsQuery};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

pub async fn get_upcoming_appointments_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let (actor, policy) = protect_route(&http_req)?;

    let usecase = GetUpcomingAppointmentsUseCase {
        actor,
        page: query_params.page.unwrap_or(1),
        limit: query_params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(res.appointments, res.page, res.limit))
        })
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetUpcomingAppointmentsUseCase {
    pub actor: Actor,
    /// Starts at 1
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidPage,
    InvalidLimit,
    LawyerProfileNotFound,
    Storage,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidPage => Self::BadClientData("The page must be at least 1".into()),
            UseCaseError::InvalidLimit => Self::BadClientData(format!(
                "The limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )),
            UseCaseError::LawyerProfileNotFound => {
                Self::NotFound("No lawyer profile was found for the signed in user".into())
            }
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub appointments: Vec<Appointment>,
    pub page: i64,
    pub limit: i64,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingAppointmentsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingAppointments";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        if self.page < 1 {
            return Err(UseCaseError::InvalidPage);
        }
        if self.limit < 1 || self.limit > MAX_PAGE_SIZE {
            return Err(UseCaseError::InvalidLimit);
        }

        let participant = match self.actor.role {
            Role::Lawyer => {
                let lawyer = ctx
                    .repos
                    .lawyers
                    .find_by_user(&self.actor.user_id)
                    .await
                    .ok_or(UseCaseError::LawyerProfileNotFound)?;
                Participant::Lawyer(lawyer.id)
            }
            Role::Client | Role::Admin => Participant::Client(self.actor.user_id.clone()),
        };

        let query = UpcomingAppointmentsQuery {
            participant,
            now: ctx.sys.get_timestamp_millis(),
            skip: (self.page - 1) * self.limit,
            limit: self.limit,
        };
        let appointments = ctx
            .repos
            .appointments
            .find_upcoming(&query)
            .await
            .map_err(|_| UseCaseError::Storage)?;

        Ok(UseCaseRes {
            appointments,
            page: self.page,
            limit: self.limit,
        })
    }
}

impl PermissionBoundary for GetUpcomingAppointmentsUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::ReadAppointment]
    }
}

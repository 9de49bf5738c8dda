use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lawyer_booking_api_structs::check_availability::*;
use lawyer_booking_domain::{TimeSpan, ID};
use lawyer_booking_infra::BookingContext;

pub async fn check_availability_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = CheckAvailabilityUseCase {
        lawyer_id: path_params.lawyer_id.clone(),
        timespan: TimeSpan::new(query_params.start_ts, query_params.end_ts),
    };

    execute(usecase, &ctx)
        .await
        .map(|available| HttpResponse::Ok().json(APIResponse { available }))
        .map_err(ApiError::from)
}

/// Checks whether the `Lawyer` has no `Appointment` occupying any part of the timespan
#[derive(Debug)]
pub struct CheckAvailabilityUseCase {
    pub lawyer_id: ID,
    pub timespan: TimeSpan,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidTimespan,
    NotFound(ID),
    Storage,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The start_ts must be before the end_ts".into())
            }
            UseCaseError::NotFound(lawyer_id) => Self::NotFound(format!(
                "The lawyer with id: {}, was not found.",
                lawyer_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CheckAvailabilityUseCase {
    type Response = bool;

    type Error = UseCaseError;

    const NAME: &'static str = "CheckAvailability";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        if !self.timespan.is_valid() {
            return Err(UseCaseError::InvalidTimespan);
        }
        if ctx.repos.lawyers.find(&self.lawyer_id).await.is_none() {
            return Err(UseCaseError::NotFound(self.lawyer_id.clone()));
        }

        let overlapping = ctx
            .repos
            .appointments
            .count_overlapping(&self.lawyer_id, &self.timespan, None)
            .await
            .map_err(|_| UseCaseError::Storage)?;

        Ok(overlapping == 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use lawyer_booking_domain::{Appointment, AppointmentStatus, Lawyer};

    #[actix_web::main]
    #[test]
    async fn reports_overlap_with_blocking_appointments() {
        let ctx = BookingContext::create_inmemory();
        let lawyer = Lawyer::new(ID::new(), "A".into(), "a@b.c".into(), "O".into(), 0);
        ctx.repos.lawyers.insert(&lawyer).await.unwrap();
        let mut appointment = Appointment::new(ID::new(), lawyer.id.clone(), 100, 200, 0);
        ctx.repos.appointments.insert(&appointment).await.unwrap();

        let check = |start: i64, end: i64| CheckAvailabilityUseCase {
            lawyer_id: lawyer.id.clone(),
            timespan: TimeSpan::new(start, end),
        };
        assert_eq!(check(150, 250).execute(&ctx).await.unwrap(), false);
        assert_eq!(check(200, 300).execute(&ctx).await.unwrap(), true);
        assert_eq!(check(0, 100).execute(&ctx).await.unwrap(), true);

        appointment.status = AppointmentStatus::Rejected;
        ctx.repos.appointments.save(&appointment).await.unwrap();
        assert_eq!(check(150, 250).execute(&ctx).await.unwrap(), true);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_requests() {
        let ctx = BookingContext::create_inmemory();
        let mut usecase = CheckAvailabilityUseCase {
            lawyer_id: ID::new(),
            timespan: TimeSpan::new(200, 100),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidTimespan)
        ));
        usecase.timespan = TimeSpan::new(100, 200);
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}

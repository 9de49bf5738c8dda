use crate::{
    error::ApiError,
    shared::{
        auth::{protect_route, Permission},
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use lawyer_booking_api_structs::run_auto_complete_sweep::APIResponse;
use lawyer_booking_infra::BookingContext;
use tracing::info;

pub async fn auto_complete_confirmed_controller(
    http_req: HttpRequest,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let (_, policy) = protect_route(&http_req)?;

    execute_with_policy(AutoCompleteConfirmedUseCase, &policy, &ctx)
        .await
        .map(|updated| HttpResponse::Ok().json(APIResponse { updated }))
        .map_err(ApiError::from)
}

/// Completes every confirmed `Appointment` that has started
#[derive(Debug)]
pub struct AutoCompleteConfirmedUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    Storage,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AutoCompleteConfirmedUseCase {
    type Response = u64;

    type Error = UseCaseError;

    const NAME: &'static str = "AutoCompleteConfirmed";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let updated = ctx
            .repos
            .appointments
            .complete_started_confirmed(now)
            .await
            .map_err(|_| UseCaseError::Storage)?;
        if updated > 0 {
            info!("Auto completed {} confirmed appointments", updated);
        }
        Ok(updated)
    }
}

impl PermissionBoundary for AutoCompleteConfirmedUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::RunJobs]
    }
}

use crate::{
    error::ApiError,
    shared::{
        auth::{protect_route, Permission},
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use lawyer_booking_api_structs::run_auto_cancel_sweep::APIResponse;
use lawyer_booking_domain::date::minutes_in_millis;
use lawyer_booking_infra::BookingContext;
use tracing::info;

/// Pending appointments are cancelled once they have started this long ago
const STALE_PENDING_MINUTES: i64 = 5;

pub async fn auto_cancel_pending_controller(
    http_req: HttpRequest,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let (_, policy) = protect_route(&http_req)?;

    execute_with_policy(AutoCancelPendingUseCase, &policy, &ctx)
        .await
        .map(|updated| HttpResponse::Ok().json(APIResponse { updated }))
        .map_err(ApiError::from)
}

/// Cancels every pending `Appointment` that was never confirmed before it started
#[derive(Debug)]
pub struct AutoCancelPendingUseCase;

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
impl UseCase for AutoCancelPendingUseCase {
    type Response = u64;

    type Error = UseCaseError;

    const NAME: &'static str = "AutoCancelPending";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let started_before = now - minutes_in_millis(STALE_PENDING_MINUTES);
        let updated = ctx
            .repos
            .appointments
            .cancel_stale_pending(started_before, now)
            .await
            .map_err(|_| UseCaseError::Storage)?;
        if updated > 0 {
            info!("Auto cancelled {} pending appointments", updated);
        }
        Ok(updated)
    }
}

impl PermissionBoundary for AutoCancelPendingUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::RunJobs]
    }
}

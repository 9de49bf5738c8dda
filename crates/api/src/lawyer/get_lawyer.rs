use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lawyer_booking_api_structs::get_lawyer::*;
use lawyer_booking_domain::{Lawyer, ID};
use lawyer_booking_infra::BookingContext;

pub async fn get_lawyer_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetLawyerUseCase {
        lawyer_id: path_params.lawyer_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|lawyer| HttpResponse::Ok().json(APIResponse::new(lawyer)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetLawyerUseCase {
    pub lawyer_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(lawyer_id) => Self::NotFound(format!(
                "The lawyer with id: {}, was not found.",
                lawyer_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetLawyerUseCase {
    type Response = Lawyer;

    type Error = UseCaseError;

    const NAME: &'static str = "GetLawyer";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .lawyers
            .find(&self.lawyer_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.lawyer_id.clone()))
    }
}

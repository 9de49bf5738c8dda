use crate::{
    error::ApiError,
    shared::{
        auth::{protect_route, Permission},
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use lawyer_booking_api_structs::create_lawyer::*;
use lawyer_booking_domain::{Lawyer, WeeklyAvailability, ID};
use lawyer_booking_infra::BookingContext;

pub async fn create_lawyer_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let (_, policy) = protect_route(&http_req)?;

    let body = body.0;
    let usecase = CreateLawyerUseCase {
        user_id: body.user_id,
        full_name: body.full_name,
        email: body.email,
        office_name: body.office_name,
        availability: body.availability,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|lawyer| HttpResponse::Created().json(APIResponse::new(lawyer)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CreateLawyerUseCase {
    pub user_id: ID,
    pub full_name: String,
    pub email: String,
    pub office_name: String,
    pub availability: Option<serde_json::Value>,
}

#[derive(Debug)]
pub enum UseCaseError {
    MissingField(&'static str),
    UserAlreadyLawyer(ID),
    Storage,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingField(field) => {
                Self::BadClientData(format!("The field `{}` must not be empty", field))
            }
            UseCaseError::UserAlreadyLawyer(user_id) => Self::Conflict(format!(
                "The user with id: {}, is already registered as a lawyer",
                user_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateLawyerUseCase {
    type Response = Lawyer;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateLawyer";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        for (field, value) in &[
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("officeName", &self.office_name),
        ] {
            if value.trim().is_empty() {
                return Err(UseCaseError::MissingField(*field));
            }
        }
        if ctx.repos.lawyers.find_by_user(&self.user_id).await.is_some() {
            return Err(UseCaseError::UserAlreadyLawyer(self.user_id.clone()));
        }

        let mut lawyer = Lawyer::new(
            self.user_id.clone(),
            self.full_name.trim().to_string(),
            self.email.trim().to_string(),
            self.office_name.trim().to_string(),
            ctx.sys.get_timestamp_millis(),
        );
        if let Some(availability) = &self.availability {
            lawyer.availability = WeeklyAvailability::from_json(availability);
        }

        ctx.repos
            .lawyers
            .insert(&lawyer)
            .await
            .map(|_| lawyer)
            .map_err(|_| UseCaseError::Storage)
    }
}

impl PermissionBoundary for CreateLawyerUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CreateLawyer]
    }
}

use crate::{
    error::ApiError,
    shared::{
        auth::{protect_route, Actor, Permission},
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use lawyer_booking_api_structs::update_lawyer_availability::*;
use lawyer_booking_domain::{Lawyer, WeeklyAvailability, ID};
use lawyer_booking_infra::BookingContext;

pub async fn update_lawyer_availability_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let (actor, policy) = protect_route(&http_req)?;

    let usecase = UpdateLawyerAvailabilityUseCase {
        actor,
        lawyer_id: path_params.lawyer_id.clone(),
        availability: body.0.availability,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|lawyer| HttpResponse::Ok().json(APIResponse::new(lawyer)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct UpdateLawyerAvailabilityUseCase {
    pub actor: Actor,
    pub lawyer_id: ID,
    pub availability: serde_json::Value,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    NotOwner,
    Storage,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(lawyer_id) => Self::NotFound(format!(
                "The lawyer with id: {}, was not found.",
                lawyer_id
            )),
            UseCaseError::NotOwner => {
                Self::Forbidden("Lawyers can only update their own availability".into())
            }
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateLawyerAvailabilityUseCase {
    type Response = Lawyer;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateLawyerAvailability";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        let mut lawyer = ctx
            .repos
            .lawyers
            .find(&self.lawyer_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.lawyer_id.clone()))?;
        if !self.actor.is_admin() && lawyer.user_id != self.actor.user_id {
            return Err(UseCaseError::NotOwner);
        }

        lawyer.availability = WeeklyAvailability::from_json(&self.availability);
        lawyer.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .lawyers
            .save(&lawyer)
            .await
            .map(|_| lawyer)
            .map_err(|_| UseCaseError::Storage)
    }
}

impl PermissionBoundary for UpdateLawyerAvailabilityUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::UpdateLawyerAvailability]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Weekday;
    use lawyer_booking_domain::Role;
    use serde_json::json;

    async fn setup() -> (BookingContext, Lawyer) {
        let ctx = BookingContext::create_inmemory();
        let lawyer = Lawyer::new(
            ID::new(),
            "Jane Doe".into(),
            "jane@example.com".into(),
            "Doe & Partners".into(),
            0,
        );
        ctx.repos.lawyers.insert(&lawyer).await.unwrap();
        (ctx, lawyer)
    }

    #[actix_web::main]
    #[test]
    async fn owner_replaces_availability() {
        let (ctx, lawyer) = setup().await;
        let mut usecase = UpdateLawyerAvailabilityUseCase {
            actor: Actor::new(lawyer.user_id.clone(), Role::Lawyer),
            lawyer_id: lawyer.id.clone(),
            availability: json!({ "friday": [{ "start": "10:00", "end": "11:00" }] }),
        };
        let res = usecase.execute(&ctx).await.expect("To update availability");
        assert_eq!(res.availability.intervals(Weekday::Fri).len(), 1);
        assert!(res.availability.intervals(Weekday::Mon).is_empty());

        let stored = ctx.repos.lawyers.find(&lawyer.id).await.unwrap();
        assert_eq!(stored.availability, res.availability);
    }

    #[actix_web::main]
    #[test]
    async fn other_lawyers_can_not_update_availability() {
        let (ctx, lawyer) = setup().await;
        let mut usecase = UpdateLawyerAvailabilityUseCase {
            actor: Actor::new(ID::new(), Role::Lawyer),
            lawyer_id: lawyer.id.clone(),
            availability: json!({}),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotOwner)
        ));

        usecase.actor = Actor::new(ID::new(), Role::Admin);
        assert!(usecase.execute(&ctx).await.is_ok());
    }
}

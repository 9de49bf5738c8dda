use crate::{APIResponse, BaseClient};
use lawyer_booking_api_structs::*;
use lawyer_booking_domain::ID;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct LawyerClient {
    base: Arc<BaseClient>,
}

pub struct CreateLawyerInput {
    pub user_id: ID,
    pub full_name: String,
    pub email: String,
    pub office_name: String,
    pub availability: Option<Value>,
}

pub struct UpdateLawyerAvailabilityInput {
    pub lawyer_id: ID,
    pub availability: Value,
}

pub struct CheckAvailabilityInput {
    pub lawyer_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
}

impl LawyerClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateLawyerInput) -> APIResponse<create_lawyer::APIResponse> {
        let body = create_lawyer::RequestBody {
            user_id: input.user_id,
            full_name: input.full_name,
            email: input.email,
            office_name: input.office_name,
            availability: input.availability,
        };
        self.base
            .post(body, "lawyers".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, lawyer_id: ID) -> APIResponse<get_lawyer::APIResponse> {
        self.base
            .get(format!("lawyers/{}", lawyer_id), StatusCode::OK)
            .await
    }

    pub async fn update_availability(
        &self,
        input: UpdateLawyerAvailabilityInput,
    ) -> APIResponse<update_lawyer_availability::APIResponse> {
        let body = update_lawyer_availability::RequestBody {
            availability: input.availability,
        };
        self.base
            .put(
                body,
                format!("lawyers/{}/availability", input.lawyer_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn check_availability(
        &self,
        input: CheckAvailabilityInput,
    ) -> APIResponse<check_availability::APIResponse> {
        self.base
            .get(
                format!(
                    "lawyers/{}/availability?start_ts={}&end_ts={}",
                    input.lawyer_id, input.start_ts, input.end_ts
                ),
                StatusCode::OK,
            )
            .await
    }
}

use crate::{APIResponse, BaseClient};
use lawyer_booking_api_structs::*;
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;

/// Triggers the periodic sweeps on demand. Requires an admin identity.
#[derive(Clone)]
pub struct JobsClient {
    base: Arc<BaseClient>,
}

impl JobsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn run_auto_cancel(&self) -> APIResponse<run_auto_cancel_sweep::APIResponse> {
        self.base
            .post(json!({}), "jobs/auto-cancel".into(), StatusCode::OK)
            .await
    }

    pub async fn run_auto_complete(&self) -> APIResponse<run_auto_complete_sweep::APIResponse> {
        self.base
            .post(json!({}), "jobs/auto-complete".into(), StatusCode::OK)
            .await
    }

    pub async fn run_reminders(&self) -> APIResponse<run_reminder_sweep::APIResponse> {
        self.base
            .post(json!({}), "jobs/reminders".into(), StatusCode::OK)
            .await
    }
}

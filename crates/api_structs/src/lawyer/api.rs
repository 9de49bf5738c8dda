use crate::dtos::LawyerDTO;
use lawyer_booking_domain::{Lawyer, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LawyerResponse {
    pub lawyer: LawyerDTO,
}

impl LawyerResponse {
    pub fn new(lawyer: Lawyer) -> Self {
        Self {
            lawyer: LawyerDTO::new(lawyer),
        }
    }
}

pub mod create_lawyer {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// The user account that will sign in as the lawyer
        pub user_id: ID,
        pub full_name: String,
        pub email: String,
        pub office_name: String,
        /// Weekly availability json, e.g. `{"monday": [{"start": "09:00", "end": "12:00"}]}`
        #[serde(default)]
        pub availability: Option<serde_json::Value>,
    }

    pub type APIResponse = LawyerResponse;
}

pub mod get_lawyer {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub lawyer_id: ID,
    }

    pub type APIResponse = LawyerResponse;
}

pub mod update_lawyer_availability {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub lawyer_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub availability: serde_json::Value,
    }

    pub type APIResponse = LawyerResponse;
}

pub mod check_availability {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub lawyer_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    pub struct QueryParams {
        pub start_ts: i64,
        pub end_ts: i64,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub available: bool,
    }
}

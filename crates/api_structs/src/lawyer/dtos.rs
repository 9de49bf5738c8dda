use lawyer_booking_domain::{Lawyer, WeeklyAvailability, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LawyerDTO {
    pub id: ID,
    pub user_id: ID,
    pub full_name: String,
    pub email: String,
    pub office_name: String,
    pub availability: WeeklyAvailability,
    pub created: i64,
    pub updated: i64,
}

impl LawyerDTO {
    pub fn new(lawyer: Lawyer) -> Self {
        Self {
            id: lawyer.id,
            user_id: lawyer.user_id,
            full_name: lawyer.full_name,
            email: lawyer.email,
            office_name: lawyer.office_name,
            availability: lawyer.availability,
            created: lawyer.created,
            updated: lawyer.updated,
        }
    }
}

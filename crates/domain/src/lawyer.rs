use crate::{
    availability::WeeklyAvailability,
    shared::entity::{Entity, ID},
};

/// A `Lawyer` that clients can book `Appointment`s with
#[derive(Debug, Clone, PartialEq)]
pub struct Lawyer {
    pub id: ID,
    /// The user account that signs in as this `Lawyer`
    pub user_id: ID,
    pub full_name: String,
    pub email: String,
    pub office_name: String,
    /// Weekly hours during which this `Lawyer` can be booked
    pub availability: WeeklyAvailability,
    pub created: i64,
    pub updated: i64,
}

impl Lawyer {
    pub fn new(user_id: ID, full_name: String, email: String, office_name: String, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            full_name,
            email,
            office_name,
            availability: Default::default(),
            created: now,
            updated: now,
        }
    }
}

impl Entity for Lawyer {
    fn id(&self) -> &ID {
        &self.id
    }
}

mod inmemory;
mod postgres;

pub use inmemory::InMemoryLawyerRepo;
use lawyer_booking_domain::{Lawyer, ID};
pub use postgres::PostgresLawyerRepo;

#[async_trait::async_trait]
pub trait ILawyerRepo: Send + Sync {
    async fn insert(&self, lawyer: &Lawyer) -> anyhow::Result<()>;
    async fn save(&self, lawyer: &Lawyer) -> anyhow::Result<()>;
    async fn find(&self, lawyer_id: &ID) -> Option<Lawyer>;
    /// Finds the `Lawyer` that the given user account signs in as
    async fn find_by_user(&self, user_id: &ID) -> Option<Lawyer>;
}

#[cfg(test)]
mod tests {
    use crate::BookingContext;
    use lawyer_booking_domain::{Lawyer, WeeklyAvailability, ID};
    use serde_json::json;

    fn lawyer() -> Lawyer {
        Lawyer::new(
            ID::new(),
            "Jane Doe".into(),
            "jane@example.com".into(),
            "Doe & Partners".into(),
            0,
        )
    }

    #[tokio::test]
    async fn create_and_find() {
        let ctx = BookingContext::create_inmemory();
        let lawyer = lawyer();
        ctx.repos.lawyers.insert(&lawyer).await.expect("To insert lawyer");

        let res = ctx.repos.lawyers.find(&lawyer.id).await.expect("To find lawyer");
        assert_eq!(res, lawyer);
        let res = ctx
            .repos
            .lawyers
            .find_by_user(&lawyer.user_id)
            .await
            .expect("To find lawyer by user");
        assert_eq!(res.id, lawyer.id);
        assert!(ctx.repos.lawyers.find(&ID::new()).await.is_none());
        assert!(ctx.repos.lawyers.find_by_user(&lawyer.id).await.is_none());
    }

    #[tokio::test]
    async fn update_availability() {
        let ctx = BookingContext::create_inmemory();
        let mut lawyer = lawyer();
        ctx.repos.lawyers.insert(&lawyer).await.expect("To insert lawyer");

        lawyer.availability = WeeklyAvailability::from_json(&json!({
            "monday": [{ "start": "09:00", "end": "12:00" }]
        }));
        lawyer.updated = 10;
        ctx.repos.lawyers.save(&lawyer).await.expect("To save lawyer");

        let res = ctx.repos.lawyers.find(&lawyer.id).await.expect("To find lawyer");
        assert_eq!(res.availability, lawyer.availability);
        assert_eq!(res.updated, 10);
    }
}

use super::ILawyerRepo;
use crate::repos::shared::inmemory_repo::*;
use lawyer_booking_domain::{Lawyer, ID};

pub struct InMemoryLawyerRepo {
    lawyers: std::sync::Mutex<Vec<Lawyer>>,
}

impl InMemoryLawyerRepo {
    pub fn new() -> Self {
        Self {
            lawyers: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ILawyerRepo for InMemoryLawyerRepo {
    async fn insert(&self, lawyer: &Lawyer) -> anyhow::Result<()> {
        insert(lawyer, &self.lawyers);
        Ok(())
    }

    async fn save(&self, lawyer: &Lawyer) -> anyhow::Result<()> {
        save(lawyer, &self.lawyers);
        Ok(())
    }

    async fn find(&self, lawyer_id: &ID) -> Option<Lawyer> {
        find(lawyer_id, &self.lawyers)
    }

    async fn find_by_user(&self, user_id: &ID) -> Option<Lawyer> {
        find_by(&self.lawyers, |l| l.user_id == *user_id)
            .into_iter()
            .next()
    }
}

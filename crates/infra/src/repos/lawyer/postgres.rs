use super::ILawyerRepo;
use lawyer_booking_domain::{Lawyer, WeeklyAvailability, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresLawyerRepo {
    pool: PgPool,
}

impl PostgresLawyerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LawyerRaw {
    lawyer_uid: Uuid,
    user_uid: Uuid,
    full_name: String,
    email: String,
    office_name: String,
    availability: serde_json::Value,
    created: i64,
    updated: i64,
}

impl From<LawyerRaw> for Lawyer {
    fn from(raw: LawyerRaw) -> Self {
        Self {
            id: raw.lawyer_uid.into(),
            user_id: raw.user_uid.into(),
            full_name: raw.full_name,
            email: raw.email,
            office_name: raw.office_name,
            availability: WeeklyAvailability::from_json(&raw.availability),
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl ILawyerRepo for PostgresLawyerRepo {
    async fn insert(&self, lawyer: &Lawyer) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO lawyers(
                lawyer_uid,
                user_uid,
                full_name,
                email,
                office_name,
                availability,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(lawyer.id.inner_ref())
        .bind(lawyer.user_id.inner_ref())
        .bind(&lawyer.full_name)
        .bind(&lawyer.email)
        .bind(&lawyer.office_name)
        .bind(Json(&lawyer.availability))
        .bind(lawyer.created)
        .bind(lawyer.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, lawyer: &Lawyer) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE lawyers SET
                user_uid = $2,
                full_name = $3,
                email = $4,
                office_name = $5,
                availability = $6,
                updated = $7
            WHERE lawyer_uid = $1
            "#,
        )
        .bind(lawyer.id.inner_ref())
        .bind(lawyer.user_id.inner_ref())
        .bind(&lawyer.full_name)
        .bind(&lawyer.email)
        .bind(&lawyer.office_name)
        .bind(Json(&lawyer.availability))
        .bind(lawyer.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, lawyer_id: &ID) -> Option<Lawyer> {
        sqlx::query_as::<_, LawyerRaw>(
            r#"
            SELECT * FROM lawyers AS l
            WHERE l.lawyer_uid = $1
            "#,
        )
        .bind(lawyer_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Option<Lawyer> {
        sqlx::query_as::<_, LawyerRaw>(
            r#"
            SELECT * FROM lawyers AS l
            WHERE l.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }
}

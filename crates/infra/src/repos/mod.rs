mod appointment;
mod lawyer;
mod shared;

pub use appointment::{
    IAppointmentRepo, InMemoryAppointmentRepo, Participant, PostgresAppointmentRepo,
    UpcomingAppointmentsQuery,
};
pub use lawyer::{ILawyerRepo, InMemoryLawyerRepo, PostgresLawyerRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub lawyers: Arc<dyn ILawyerRepo>,
    pub appointments: Arc<dyn IAppointmentRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            lawyers: Arc::new(PostgresLawyerRepo::new(pool.clone())),
            appointments: Arc::new(PostgresAppointmentRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            lawyers: Arc::new(InMemoryLawyerRepo::new()),
            appointments: Arc::new(InMemoryAppointmentRepo::new()),
        }
    }
}

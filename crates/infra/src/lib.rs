mod config;
mod notifications;
mod repos;
mod system;

pub use config::Config;
pub use notifications::{
    run_notification_worker, INotifier, InMemoryNotifier, LogNotifier, NotificationQueue,
    WebhookNotifier,
};
pub use repos::{IAppointmentRepo, ILawyerRepo, Participant, Repos, UpcomingAppointmentsQuery};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

#[derive(Clone)]
pub struct BookingContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
    pub notifications: NotificationQueue,
}

impl BookingContext {
    /// Context with inmemory repositories and a logging notifier
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(LogNotifier {}),
            notifications: NotificationQueue::new(),
        }
    }

    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.database_url {
            Some(url) => Repos::create_postgres(url).await?,
            None => Repos::create_inmemory(),
        };
        let notifier: Arc<dyn INotifier> = match &config.notification_webhook_url {
            Some(url) => {
                info!("Notifications will be posted to: {}", url);
                Arc::new(WebhookNotifier::new(url.clone()))
            }
            None => Arc::new(LogNotifier {}),
        };
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
            notifications: NotificationQueue::new(),
        })
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<BookingContext> {
    BookingContext::create(Config::new()).await
}

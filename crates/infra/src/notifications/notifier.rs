use anyhow::anyhow;
use lawyer_booking_domain::Notification;
use reqwest::Client;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};
use tracing::info;

/// Delivers `Notification`s to their recipients
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Only logs the `Notification`s. Used when no delivery endpoint is configured.
pub struct LogNotifier {}

#[async_trait::async_trait]
impl INotifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        info!(
            recipient_id = %notification.recipient_id,
            recipient_role = notification.recipient_role.as_str(),
            appointment_id = %notification.appointment_id,
            "Notification: {:?}",
            notification.kind
        );
        Ok(())
    }
}

/// Posts every `Notification` as json to a webhook which is responsible
/// for rendering and sending the actual message
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        self.client
            .post(&self.url)
            .json(notification)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Records the `Notification`s instead of delivering them
#[derive(Default)]
pub struct InMemoryNotifier {
    sent: Mutex<Vec<Notification>>,
    failing: AtomicBool,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Default::default()
    }

    /// Makes every following delivery fail until it is turned off again
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("Notification delivery failed"));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

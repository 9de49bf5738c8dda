mod notifier;
mod queue;

pub use notifier::{INotifier, InMemoryNotifier, LogNotifier, WebhookNotifier};
pub use queue::{run_notification_worker, NotificationQueue};

use super::INotifier;
use lawyer_booking_domain::Notification;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{error, warn};

/// Queue of `Notification`s waiting to be delivered by the notification worker.
/// Pushing never blocks the caller.
#[derive(Clone)]
pub struct NotificationQueue {
    sender: UnboundedSender<Notification>,
    receiver: Arc<Mutex<Option<UnboundedReceiver<Notification>>>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            sender,
            receiver: Arc::new(Mutex::new(Some(receiver))),
        }
    }

    pub fn push(&self, notification: Notification) {
        if let Err(e) = self.sender.send(notification) {
            warn!(
                "Notification queue is closed, dropping notification: {:?}",
                e.0
            );
        }
    }

    /// Hands out the receiving end of the queue. Only the first caller gets it.
    pub fn take_receiver(&self) -> Option<UnboundedReceiver<Notification>> {
        self.receiver.lock().ok()?.take()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Delivers queued `Notification`s until every sender is dropped.
/// A failed delivery is retried up to `max_attempts` times in total, waiting
/// `backoff * attempt` between the attempts.
pub async fn run_notification_worker(
    mut receiver: UnboundedReceiver<Notification>,
    notifier: Arc<dyn INotifier>,
    max_attempts: usize,
    backoff: Duration,
) {
    while let Some(notification) = receiver.recv().await {
        for attempt in 1..=max_attempts {
            match notifier.notify(&notification).await {
                Ok(_) => break,
                Err(e) if attempt < max_attempts => {
                    warn!(
                        "Notification delivery attempt {} of {} failed: {:?}",
                        attempt, max_attempts, e
                    );
                    tokio::time::sleep(backoff * attempt as u32).await;
                }
                Err(e) => {
                    error!(
                        "Giving up delivering notification: {:?} after {} attempts. Error: {:?}",
                        notification, max_attempts, e
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::InMemoryNotifier;
    use lawyer_booking_domain::{Appointment, NotificationKind, ID};

    fn notification() -> Notification {
        let appointment = Appointment::new(ID::new(), ID::new(), 10, 20, 0);
        Notification::for_client(&appointment, NotificationKind::NewAppointment)
    }

    #[tokio::test]
    async fn worker_delivers_queued_notifications() {
        let queue = NotificationQueue::new();
        let receiver = queue.take_receiver().expect("Receiver to be available");
        assert!(queue.take_receiver().is_none());

        let notifier = Arc::new(InMemoryNotifier::new());
        let n1 = notification();
        let n2 = notification();
        queue.push(n1.clone());
        queue.push(n2.clone());
        drop(queue);

        run_notification_worker(receiver, notifier.clone(), 3, Duration::from_millis(1)).await;
        assert_eq!(notifier.sent(), vec![n1, n2]);
    }

    #[tokio::test]
    async fn worker_gives_up_after_max_attempts() {
        let queue = NotificationQueue::new();
        let receiver = queue.take_receiver().expect("Receiver to be available");
        let notifier = Arc::new(InMemoryNotifier::new());
        notifier.set_failing(true);
        queue.push(notification());
        drop(queue);

        run_notification_worker(receiver, notifier.clone(), 2, Duration::from_millis(1)).await;
        assert!(notifier.sent().is_empty());
    }
}

use crate::{
    jobs::{AutoCancelPendingUseCase, AutoCompleteConfirmedUseCase, SendRemindersUseCase},
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use lawyer_booking_infra::{run_notification_worker, BookingContext};
use std::time::Duration;
use tracing::{info, warn};

/// Pause before retrying a failed notification, multiplied by the attempt number
const NOTIFICATION_BACKOFF_SECS: u64 = 1;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Runs the auto cancel, auto complete and reminder sweeps periodically,
/// starting at the next whole minute
pub fn start_sweep_job_scheduler(ctx: BookingContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut sweep_interval = interval(Duration::from_secs(ctx.config.sweep_interval_secs));
        loop {
            sweep_interval.tick().await;
            run_sweeps(&ctx).await;
        }
    });
}

async fn run_sweeps(ctx: &BookingContext) {
    // Errors are logged by the usecase runner
    let _ = execute(AutoCancelPendingUseCase, ctx).await;
    let _ = execute(AutoCompleteConfirmedUseCase, ctx).await;
    let _ = execute(SendRemindersUseCase, ctx).await;
}

/// Spawns the worker delivering the queued `Notification`s
pub fn start_notification_worker(ctx: BookingContext) {
    let receiver = match ctx.notifications.take_receiver() {
        Some(receiver) => receiver,
        None => {
            warn!("The notification worker has already been started");
            return;
        }
    };
    info!("Starting the notification worker");
    actix_web::rt::spawn(run_notification_worker(
        receiver,
        ctx.notifier.clone(),
        ctx.config.notification_max_attempts,
        Duration::from_secs(NOTIFICATION_BACKOFF_SECS),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}

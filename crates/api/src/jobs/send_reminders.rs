use crate::{
    error::ApiError,
    shared::{
        auth::{protect_route, Permission},
        usecase::{execute_with_policy, PermissionBoundary, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use lawyer_booking_api_structs::run_reminder_sweep::APIResponse;
use lawyer_booking_domain::{
    date::hours_in_millis, due_reminder, Notification, NotificationKind,
};
use lawyer_booking_infra::BookingContext;
use tracing::{error, info};

/// Appointments starting later than this can not have a due reminder
const REMINDER_HORIZON_HOURS: i64 = 25;

pub async fn send_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let (_, policy) = protect_route(&http_req)?;

    execute_with_policy(SendRemindersUseCase, &policy, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                sent: res.sent,
                failed: res.failed,
            })
        })
        .map_err(ApiError::from)
}

/// Sends the day and hour reminders that are due to the `Lawyer`s.
/// A reminder is marked as sent only after it was delivered.
#[derive(Debug)]
pub struct SendRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    Storage,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct UseCaseRes {
    pub sent: usize,
    pub failed: usize,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRemindersUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminders";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let candidates = ctx
            .repos
            .appointments
            .find_reminder_candidates(now, now + hours_in_millis(REMINDER_HORIZON_HOURS))
            .await
            .map_err(|_| UseCaseError::Storage)?;

        let mut res = UseCaseRes::default();
        for appointment in candidates {
            let reminder = match due_reminder(&appointment, now) {
                Some(reminder) => reminder,
                None => continue,
            };
            let lawyer = match ctx.repos.lawyers.find(&appointment.lawyer_id).await {
                Some(lawyer) => lawyer,
                None => {
                    error!(
                        "Unable to send {} reminder for appointment: {}. The lawyer: {} was not found",
                        reminder.as_str(),
                        appointment.id,
                        appointment.lawyer_id
                    );
                    res.failed += 1;
                    continue;
                }
            };

            let notification = Notification::for_lawyer(
                lawyer.user_id,
                &appointment,
                NotificationKind::Reminder { reminder },
            );
            if let Err(e) = ctx.notifier.notify(&notification).await {
                error!(
                    "Failed to send {} reminder for appointment: {}. Error: {:?}",
                    reminder.as_str(),
                    appointment.id,
                    e
                );
                res.failed += 1;
                continue;
            }

            match ctx
                .repos
                .appointments
                .mark_reminder_sent(&appointment.id, reminder, now)
                .await
            {
                Ok(_) => res.sent += 1,
                Err(e) => {
                    error!(
                        "Sent {} reminder for appointment: {} but was unable to mark it. Error: {:?}",
                        reminder.as_str(),
                        appointment.id,
                        e
                    );
                    res.failed += 1;
                }
            }
        }

        if res.sent > 0 || res.failed > 0 {
            info!(
                "Reminder sweep sent {} reminders, {} failed",
                res.sent, res.failed
            );
        }
        Ok(res)
    }
}

impl PermissionBoundary for SendRemindersUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::RunJobs]
    }
}

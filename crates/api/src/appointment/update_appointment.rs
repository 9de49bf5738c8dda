use super::subscribers::NotifyOnAppointmentStatusChanged;
use crate::{
    error::ApiError,
    shared::{
        auth::{protect_route, Actor, Permission},
        usecase::{execute_with_policy, PermissionBoundary, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use lawyer_booking_api_structs::update_appointment::*;
use lawyer_booking_domain::{
    booking_window::validate_cancellation_cutoff, Appointment, AppointmentStatus, Lawyer, Role,
    TimeSpan, ID,
};
use lawyer_booking_infra::BookingContext;

pub async fn update_appointment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<BookingContext>,
) -> Result<HttpResponse, ApiError> {
    let (actor, policy) = protect_route(&http_req)?;

    let usecase = UpdateAppointmentUseCase {
        actor,
        appointment_id: path_params.appointment_id.clone(),
        changes: body.0,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.appointment)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct UpdateAppointmentUseCase {
    pub actor: Actor,
    pub appointment_id: ID,
    pub changes: RequestBody,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    NotParticipant,
    ClientMayOnlyCancel,
    AdminReasonNotAllowed,
    AlreadyClosed(AppointmentStatus),
    PastCancellationCutoff(String),
    InvalidTimespan,
    NotAvailable,
    Storage,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "The appointment with id: {}, was not found.",
                id
            )),
            UseCaseError::NotParticipant => {
                Self::Forbidden("Not allowed to modify this appointment".into())
            }
            UseCaseError::ClientMayOnlyCancel => Self::BadClientData(
                "Clients can only change the status of an appointment to cancelled".into(),
            ),
            UseCaseError::AdminReasonNotAllowed => {
                Self::BadClientData("Only admins can set the adminReason".into())
            }
            UseCaseError::AlreadyClosed(status) => Self::BadClientData(format!(
                "An appointment with status {} can not be cancelled",
                status
            )),
            UseCaseError::PastCancellationCutoff(msg) => Self::PolicyViolation(msg),
            UseCaseError::InvalidTimespan => {
                Self::BadClientData("The startTs must be before the endTs".into())
            }
            UseCaseError::NotAvailable => Self::Conflict(
                "The lawyer already has an appointment in the requested time".into(),
            ),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub appointment: Appointment,
    pub previous_status: AppointmentStatus,
    /// Role of the user that made the change
    pub changed_by: Role,
    pub lawyer: Lawyer,
}

impl UpdateAppointmentUseCase {
    fn apply_client_changes(
        &self,
        appointment: &mut Appointment,
        now: i64,
    ) -> Result<(), UseCaseError> {
        let c = &self.changes;
        let only_cancels = c.status == Some(AppointmentStatus::Cancelled)
            && c.description.is_none()
            && c.start_ts.is_none()
            && c.end_ts.is_none()
            && c.meeting_link.is_none()
            && c.notes.is_none()
            && c.chat_enabled.is_none()
            && c.admin_reason.is_none();
        if !only_cancels {
            return Err(UseCaseError::ClientMayOnlyCancel);
        }
        if !appointment.status.is_active() {
            return Err(UseCaseError::AlreadyClosed(appointment.status));
        }
        validate_cancellation_cutoff(appointment.start_ts, now)
            .map_err(|e| UseCaseError::PastCancellationCutoff(e.to_string()))?;

        appointment.status = AppointmentStatus::Cancelled;
        appointment.cancel_reason = c.cancel_reason.clone();
        Ok(())
    }

    async fn apply_changes(
        &self,
        appointment: &mut Appointment,
        ctx: &BookingContext,
    ) -> Result<(), UseCaseError> {
        let c = &self.changes;
        if c.admin_reason.is_some() && !self.actor.is_admin() {
            return Err(UseCaseError::AdminReasonNotAllowed);
        }

        let timespan = TimeSpan::new(
            c.start_ts.unwrap_or(appointment.start_ts),
            c.end_ts.unwrap_or(appointment.end_ts),
        );
        if !timespan.is_valid() {
            return Err(UseCaseError::InvalidTimespan);
        }
        let status = c.status.unwrap_or(appointment.status);
        let times_changed = timespan != appointment.timespan();
        let reopens = !appointment.status.blocks_time();
        if status.blocks_time() && (times_changed || reopens) {
            let overlapping = ctx
                .repos
                .appointments
                .count_overlapping(&appointment.lawyer_id, &timespan, Some(&appointment.id))
                .await
                .map_err(|_| UseCaseError::Storage)?;
            if overlapping > 0 {
                return Err(UseCaseError::NotAvailable);
            }
        }

        appointment.start_ts = timespan.start();
        appointment.end_ts = timespan.end();
        appointment.status = status;
        if let Some(description) = &c.description {
            appointment.description = Some(description.clone());
        }
        if let Some(meeting_link) = &c.meeting_link {
            appointment.meeting_link = Some(meeting_link.clone());
        }
        if let Some(notes) = &c.notes {
            appointment.notes = Some(notes.clone());
        }
        if let Some(chat_enabled) = c.chat_enabled {
            appointment.chat_enabled = chat_enabled;
        }
        if let Some(cancel_reason) = &c.cancel_reason {
            appointment.cancel_reason = Some(cancel_reason.clone());
        }
        if let Some(admin_reason) = &c.admin_reason {
            appointment.admin_reason = Some(admin_reason.clone());
        }
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateAppointmentUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateAppointment";

    async fn execute(&mut self, ctx: &BookingContext) -> Result<Self::Response, Self::Error> {
        let mut appointment = ctx
            .repos
            .appointments
            .find(&self.appointment_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.appointment_id.clone()))?;
        let lawyer = ctx
            .repos
            .lawyers
            .find(&appointment.lawyer_id)
            .await
            .ok_or(UseCaseError::Storage)?;
        let previous_status = appointment.status;
        let now = ctx.sys.get_timestamp_millis();

        match self.actor.role {
            Role::Client => {
                if appointment.client_id != self.actor.user_id {
                    return Err(UseCaseError::NotParticipant);
                }
                self.apply_client_changes(&mut appointment, now)?;
            }
            Role::Lawyer => {
                if lawyer.user_id != self.actor.user_id {
                    return Err(UseCaseError::NotParticipant);
                }
                self.apply_changes(&mut appointment, ctx).await?;
            }
            Role::Admin => {
                self.apply_changes(&mut appointment, ctx).await?;
            }
        }
        appointment.updated = now;

        ctx.repos
            .appointments
            .save(&appointment)
            .await
            .map_err(|_| UseCaseError::Storage)?;

        Ok(UseCaseRes {
            appointment,
            previous_status,
            changed_by: self.actor.role,
            lawyer,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyOnAppointmentStatusChanged)]
    }
}

impl PermissionBoundary for UpdateAppointmentUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::UpdateAppointment]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use lawyer_booking_domain::{date::hours_in_millis, NotificationKind};
    use lawyer_booking_infra::StaticTimeSys;
    use std::sync::Arc;

    const NOW: i64 = 1_717_408_800_000;

    struct TestContext {
        ctx: BookingContext,
        lawyer: Lawyer,
        appointment: Appointment,
    }

    async fn setup(starts_in_hours: i64) -> TestContext {
        let mut ctx = BookingContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys { timestamp: NOW });
        let lawyer = Lawyer::new(ID::new(), "A".into(), "a@b.c".into(), "O".into(), 0);
        ctx.repos.lawyers.insert(&lawyer).await.unwrap();
        let start = NOW + hours_in_millis(starts_in_hours);
        let appointment = Appointment::new(
            ID::new(),
            lawyer.id.clone(),
            start,
            start + hours_in_millis(1),
            0,
        );
        ctx.repos.appointments.insert(&appointment).await.unwrap();

        TestContext {
            ctx,
            lawyer,
            appointment,
        }
    }

    fn cancel(actor: Actor, appointment: &Appointment) -> UpdateAppointmentUseCase {
        UpdateAppointmentUseCase {
            actor,
            appointment_id: appointment.id.clone(),
            changes: RequestBody {
                status: Some(AppointmentStatus::Cancelled),
                cancel_reason: Some("Sick".into()),
                ..Default::default()
            },
        }
    }

    #[actix_web::main]
    #[test]
    async fn client_can_cancel_fifty_hours_ahead() {
        let test = setup(50).await;
        let client = Actor::new(test.appointment.client_id.clone(), Role::Client);
        let res = cancel(client, &test.appointment)
            .execute(&test.ctx)
            .await
            .expect("To cancel");
        assert_eq!(res.appointment.status, AppointmentStatus::Cancelled);
        assert_eq!(res.appointment.cancel_reason.as_deref(), Some("Sick"));
        assert_eq!(res.appointment.updated, NOW);
    }

    #[actix_web::main]
    #[test]
    async fn client_can_not_cancel_thirty_hours_ahead() {
        let test = setup(30).await;
        let client = Actor::new(test.appointment.client_id.clone(), Role::Client);
        assert!(matches!(
            cancel(client, &test.appointment).execute(&test.ctx).await,
            Err(UseCaseError::PastCancellationCutoff(_))
        ));
        let stored = test.ctx.repos.appointments.find(&test.appointment.id).await.unwrap();
        assert_eq!(stored.status, AppointmentStatus::Pending);
    }

    #[actix_web::main]
    #[test]
    async fn lawyer_can_cancel_inside_cutoff() {
        let test = setup(30).await;
        let lawyer = Actor::new(test.lawyer.user_id.clone(), Role::Lawyer);
        let res = cancel(lawyer, &test.appointment).execute(&test.ctx).await;
        assert!(res.is_ok());
    }

    #[actix_web::main]
    #[test]
    async fn client_may_only_cancel() {
        let test = setup(50).await;
        let client = Actor::new(test.appointment.client_id.clone(), Role::Client);
        let mut usecase = UpdateAppointmentUseCase {
            actor: client.clone(),
            appointment_id: test.appointment.id.clone(),
            changes: RequestBody {
                status: Some(AppointmentStatus::Confirmed),
                ..Default::default()
            },
        };
        assert!(matches!(
            usecase.execute(&test.ctx).await,
            Err(UseCaseError::ClientMayOnlyCancel)
        ));

        let mut other_client = cancel(Actor::new(ID::new(), Role::Client), &test.appointment);
        assert!(matches!(
            other_client.execute(&test.ctx).await,
            Err(UseCaseError::NotParticipant)
        ));
    }

    #[actix_web::main]
    #[test]
    async fn rescheduling_checks_for_conflicts() {
        let test = setup(100).await;
        let other_start = test.appointment.start_ts + hours_in_millis(3);
        let other = Appointment::new(
            ID::new(),
            test.lawyer.id.clone(),
            other_start,
            other_start + hours_in_millis(1),
            0,
        );
        test.ctx.repos.appointments.insert(&other).await.unwrap();
        let lawyer = Actor::new(test.lawyer.user_id.clone(), Role::Lawyer);

        let mut usecase = UpdateAppointmentUseCase {
            actor: lawyer.clone(),
            appointment_id: test.appointment.id.clone(),
            changes: RequestBody {
                start_ts: Some(other_start),
                end_ts: Some(other_start + hours_in_millis(1)),
                ..Default::default()
            },
        };
        assert!(matches!(
            usecase.execute(&test.ctx).await,
            Err(UseCaseError::NotAvailable)
        ));

        // Moving within its own slot does not conflict with itself
        usecase.changes = RequestBody {
            start_ts: Some(test.appointment.start_ts + hours_in_millis(1) / 2),
            end_ts: Some(test.appointment.end_ts + hours_in_millis(1) / 2),
            status: Some(AppointmentStatus::Confirmed),
            ..Default::default()
        };
        let res = usecase.execute(&test.ctx).await.expect("To reschedule");
        assert_eq!(res.appointment.status, AppointmentStatus::Confirmed);

        usecase.changes = RequestBody {
            start_ts: Some(other_start + hours_in_millis(1)),
            end_ts: Some(other_start),
            ..Default::default()
        };
        assert!(matches!(
            usecase.execute(&test.ctx).await,
            Err(UseCaseError::InvalidTimespan)
        ));
    }

    #[actix_web::main]
    #[test]
    async fn reopening_a_closed_appointment_checks_for_conflicts() {
        let test = setup(100).await;
        let mut cancelled = test.appointment.clone();
        cancelled.status = AppointmentStatus::Cancelled;
        test.ctx.repos.appointments.save(&cancelled).await.unwrap();
        let mut booked = Appointment::new(
            ID::new(),
            test.lawyer.id.clone(),
            cancelled.start_ts,
            cancelled.end_ts,
            0,
        );
        booked.status = AppointmentStatus::Confirmed;
        test.ctx.repos.appointments.insert(&booked).await.unwrap();

        let mut usecase = UpdateAppointmentUseCase {
            actor: Actor::new(ID::new(), Role::Admin),
            appointment_id: cancelled.id.clone(),
            changes: RequestBody {
                status: Some(AppointmentStatus::Confirmed),
                ..Default::default()
            },
        };
        assert!(matches!(
            usecase.execute(&test.ctx).await,
            Err(UseCaseError::NotAvailable)
        ));
        let stored = test.ctx.repos.appointments.find(&cancelled.id).await.unwrap();
        assert_eq!(stored.status, AppointmentStatus::Cancelled);

        // Closed appointments can still be edited without taking the slot back
        usecase.changes = RequestBody {
            notes: Some("Client asked to rebook".into()),
            ..Default::default()
        };
        let res = usecase.execute(&test.ctx).await.expect("To update notes");
        assert_eq!(res.appointment.status, AppointmentStatus::Cancelled);

        let mut booked_cancel = cancel(Actor::new(ID::new(), Role::Admin), &booked);
        booked_cancel.execute(&test.ctx).await.expect("To cancel");
        usecase.changes = RequestBody {
            status: Some(AppointmentStatus::Pending),
            ..Default::default()
        };
        let res = usecase.execute(&test.ctx).await.expect("To reopen");
        assert_eq!(res.appointment.status, AppointmentStatus::Pending);
    }

    #[actix_web::main]
    #[test]
    async fn only_admins_set_admin_reason() {
        let test = setup(100).await;
        let changes = || RequestBody {
            admin_reason: Some("Moved by support".into()),
            ..Default::default()
        };
        let mut usecase = UpdateAppointmentUseCase {
            actor: Actor::new(test.lawyer.user_id.clone(), Role::Lawyer),
            appointment_id: test.appointment.id.clone(),
            changes: changes(),
        };
        assert!(matches!(
            usecase.execute(&test.ctx).await,
            Err(UseCaseError::AdminReasonNotAllowed)
        ));
        usecase.actor = Actor::new(ID::new(), Role::Admin);
        usecase.changes = changes();
        let res = usecase.execute(&test.ctx).await.expect("To update");
        assert_eq!(res.appointment.admin_reason.as_deref(), Some("Moved by support"));
    }

    #[actix_web::main]
    #[test]
    async fn notifies_about_status_changes() {
        let test = setup(100).await;
        let mut receiver = test.ctx.notifications.take_receiver().unwrap();

        let confirm = UpdateAppointmentUseCase {
            actor: Actor::new(test.lawyer.user_id.clone(), Role::Lawyer),
            appointment_id: test.appointment.id.clone(),
            changes: RequestBody {
                status: Some(AppointmentStatus::Confirmed),
                ..Default::default()
            },
        };
        execute(confirm, &test.ctx).await.expect("To confirm");
        let notification = receiver.try_recv().expect("Client to be notified");
        assert_eq!(notification.recipient_id, test.appointment.client_id);
        assert_eq!(
            notification.kind,
            NotificationKind::StatusChanged {
                status: AppointmentStatus::Confirmed
            }
        );
        assert!(receiver.try_recv().is_err());

        let client = Actor::new(test.appointment.client_id.clone(), Role::Client);
        execute(cancel(client, &test.appointment), &test.ctx)
            .await
            .expect("To cancel");
        let notification = receiver.try_recv().expect("Lawyer to be notified");
        assert_eq!(notification.recipient_id, test.lawyer.user_id);
        assert_eq!(notification.recipient_role, Role::Lawyer);

        let notes_only = UpdateAppointmentUseCase {
            actor: Actor::new(ID::new(), Role::Admin),
            appointment_id: test.appointment.id.clone(),
            changes: RequestBody {
                notes: Some("Bring documents".into()),
                ..Default::default()
            },
        };
        execute(notes_only, &test.ctx).await.expect("To update notes");
        assert!(receiver.try_recv().is_err());
    }
}

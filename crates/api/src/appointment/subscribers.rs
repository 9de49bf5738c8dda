use super::{
    create_appointment::{CreateAppointmentUseCase, UseCaseRes as CreatedAppointment},
    reject_appointment::RejectAppointmentUseCase,
    update_appointment::{UpdateAppointmentUseCase, UseCaseRes as UpdatedAppointment},
};
use crate::shared::usecase::Subscriber;
use lawyer_booking_domain::{Appointment, Notification, NotificationKind, Role};
use lawyer_booking_infra::BookingContext;

pub struct NotifyLawyerOnAppointmentCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateAppointmentUseCase> for NotifyLawyerOnAppointmentCreated {
    async fn notify(&self, e: &CreatedAppointment, ctx: &BookingContext) {
        ctx.notifications.push(Notification::for_lawyer(
            e.lawyer.user_id.clone(),
            &e.appointment,
            NotificationKind::NewAppointment,
        ));
    }
}

/// Lawyer changes go to the client, client cancellations go to the lawyer
/// and admin changes go to both
pub struct NotifyOnAppointmentStatusChanged;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateAppointmentUseCase> for NotifyOnAppointmentStatusChanged {
    async fn notify(&self, e: &UpdatedAppointment, ctx: &BookingContext) {
        let appointment = &e.appointment;
        if appointment.status == e.previous_status {
            return;
        }
        let kind = NotificationKind::StatusChanged {
            status: appointment.status,
        };

        let notify_client = matches!(e.changed_by, Role::Lawyer | Role::Admin);
        let notify_lawyer = matches!(e.changed_by, Role::Client | Role::Admin);
        if notify_client {
            ctx.notifications
                .push(Notification::for_client(appointment, kind.clone()));
        }
        if notify_lawyer {
            ctx.notifications.push(Notification::for_lawyer(
                e.lawyer.user_id.clone(),
                appointment,
                kind,
            ));
        }
    }
}

pub struct NotifyClientOnAppointmentRejected;

#[async_trait::async_trait(?Send)]
impl Subscriber<RejectAppointmentUseCase> for NotifyClientOnAppointmentRejected {
    async fn notify(&self, e: &Appointment, ctx: &BookingContext) {
        let reason = e.reject_reason.clone().unwrap_or_default();
        ctx.notifications.push(Notification::for_client(
            e,
            NotificationKind::Rejected { reason },
        ));
    }
}

mod inmemory;
mod postgres;

pub use inmemory::InMemoryAppointmentRepo;
use lawyer_booking_domain::{Appointment, ReminderKind, TimeSpan, ID};
pub use postgres::PostgresAppointmentRepo;

/// Which side of the `Appointment` the user is on
#[derive(Debug, Clone, PartialEq)]
pub enum Participant {
    Client(ID),
    Lawyer(ID),
}

#[derive(Debug, Clone)]
pub struct UpcomingAppointmentsQuery {
    pub participant: Participant,
    pub now: i64,
    pub skip: i64,
    pub limit: i64,
}

#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()>;
    async fn find(&self, appointment_id: &ID) -> Option<Appointment>;
    /// `Appointment`s of the `Lawyer` that block time and overlap `timespan`
    async fn find_overlapping(
        &self,
        lawyer_id: &ID,
        timespan: &TimeSpan,
    ) -> anyhow::Result<Vec<Appointment>>;
    /// Number of `Appointment`s of the `Lawyer` that block time and overlap
    /// `timespan`, not counting the `Appointment` with id `ignore`
    async fn count_overlapping(
        &self,
        lawyer_id: &ID,
        timespan: &TimeSpan,
        ignore: Option<&ID>,
    ) -> anyhow::Result<i64>;
    /// Appointments of the participant that are not cancelled and have not
    /// ended yet, ordered by their start
    async fn find_upcoming(
        &self,
        query: &UpcomingAppointmentsQuery,
    ) -> anyhow::Result<Vec<Appointment>>;
    /// Appointments that can still get a reminder and start in `(now, until)`
    async fn find_reminder_candidates(
        &self,
        now: i64,
        until: i64,
    ) -> anyhow::Result<Vec<Appointment>>;
    /// Cancels pending appointments starting at or before `started_before`
    async fn cancel_stale_pending(&self, started_before: i64, now: i64) -> anyhow::Result<u64>;
    /// Completes confirmed appointments starting at or before `now`
    async fn complete_started_confirmed(&self, now: i64) -> anyhow::Result<u64>;
    async fn mark_reminder_sent(
        &self,
        appointment_id: &ID,
        reminder: ReminderKind,
        now: i64,
    ) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookingContext;
    use lawyer_booking_domain::AppointmentStatus;

    const HOUR: i64 = 1000 * 60 * 60;
    const MINUTE: i64 = 1000 * 60;

    fn appointment(lawyer_id: &ID, start: i64, end: i64, status: AppointmentStatus) -> Appointment {
        let mut appointment = Appointment::new(ID::new(), lawyer_id.clone(), start, end, 0);
        appointment.status = status;
        appointment
    }

    #[tokio::test]
    async fn create_and_find() {
        let ctx = BookingContext::create_inmemory();
        let appointment = appointment(&ID::new(), 10, 20, AppointmentStatus::Pending);
        ctx.repos
            .appointments
            .insert(&appointment)
            .await
            .expect("To insert appointment");

        let res = ctx
            .repos
            .appointments
            .find(&appointment.id)
            .await
            .expect("To find appointment");
        assert_eq!(res, appointment);
        assert!(ctx.repos.appointments.find(&ID::new()).await.is_none());
    }

    #[tokio::test]
    async fn overlap_ignores_freed_and_foreign_appointments() {
        let ctx = BookingContext::create_inmemory();
        let lawyer_id = ID::new();
        let confirmed = appointment(&lawyer_id, 10 * HOUR, 11 * HOUR, AppointmentStatus::Confirmed);
        let cancelled = appointment(&lawyer_id, 10 * HOUR, 11 * HOUR, AppointmentStatus::Cancelled);
        let rejected = appointment(&lawyer_id, 10 * HOUR, 11 * HOUR, AppointmentStatus::Rejected);
        let other_lawyer = appointment(&ID::new(), 10 * HOUR, 11 * HOUR, AppointmentStatus::Pending);
        for a in &[&confirmed, &cancelled, &rejected, &other_lawyer] {
            ctx.repos.appointments.insert(a).await.unwrap();
        }
        let repo = &ctx.repos.appointments;

        let span = TimeSpan::new(10 * HOUR + 30 * MINUTE, 11 * HOUR + 30 * MINUTE);
        assert_eq!(repo.count_overlapping(&lawyer_id, &span, None).await.unwrap(), 1);
        let overlapping = repo.find_overlapping(&lawyer_id, &span).await.unwrap();
        assert_eq!(overlapping.len(), 1);
        assert_eq!(overlapping[0].id, confirmed.id);

        // Touching intervals do not overlap
        let span = TimeSpan::new(11 * HOUR, 12 * HOUR);
        assert_eq!(repo.count_overlapping(&lawyer_id, &span, None).await.unwrap(), 0);

        let span = TimeSpan::new(10 * HOUR, 11 * HOUR);
        assert_eq!(
            repo.count_overlapping(&lawyer_id, &span, Some(&confirmed.id))
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn sweeps_are_idempotent() {
        let ctx = BookingContext::create_inmemory();
        let lawyer_id = ID::new();
        let now = 100 * HOUR;
        let stale = appointment(&lawyer_id, now - 10 * MINUTE, now + HOUR, AppointmentStatus::Pending);
        let fresh = appointment(&lawyer_id, now - 2 * MINUTE, now + HOUR, AppointmentStatus::Pending);
        let started = appointment(&lawyer_id, now, now + HOUR, AppointmentStatus::Confirmed);
        let future = appointment(&lawyer_id, now + MINUTE, now + HOUR, AppointmentStatus::Confirmed);
        for a in &[&stale, &fresh, &started, &future] {
            ctx.repos.appointments.insert(a).await.unwrap();
        }
        let repo = &ctx.repos.appointments;

        assert_eq!(repo.cancel_stale_pending(now - 5 * MINUTE, now).await.unwrap(), 1);
        assert_eq!(repo.cancel_stale_pending(now - 5 * MINUTE, now).await.unwrap(), 0);
        assert_eq!(repo.complete_started_confirmed(now).await.unwrap(), 1);
        assert_eq!(repo.complete_started_confirmed(now).await.unwrap(), 0);

        let expected = vec![
            (&stale.id, AppointmentStatus::Cancelled),
            (&fresh.id, AppointmentStatus::Pending),
            (&started.id, AppointmentStatus::Completed),
            (&future.id, AppointmentStatus::Confirmed),
        ];
        for (id, status) in expected {
            assert_eq!(repo.find(id).await.unwrap().status, status);
        }
    }

    #[tokio::test]
    async fn upcoming_appointments_are_paginated_by_start() {
        let ctx = BookingContext::create_inmemory();
        let lawyer_id = ID::new();
        let client_id = ID::new();
        let now = 100 * HOUR;
        let mut starts = vec![5, 1, 3, 2, 4];
        for start in &starts {
            let mut a = appointment(
                &lawyer_id,
                now + start * HOUR,
                now + start * HOUR + HOUR,
                AppointmentStatus::Pending,
            );
            a.client_id = client_id.clone();
            ctx.repos.appointments.insert(&a).await.unwrap();
        }
        let mut ended = appointment(&lawyer_id, now - 2 * HOUR, now - HOUR, AppointmentStatus::Completed);
        ended.client_id = client_id.clone();
        let mut cancelled = appointment(&lawyer_id, now + HOUR, now + 2 * HOUR, AppointmentStatus::Cancelled);
        cancelled.client_id = client_id.clone();
        ctx.repos.appointments.insert(&ended).await.unwrap();
        ctx.repos.appointments.insert(&cancelled).await.unwrap();
        starts.sort();

        let mut query = UpcomingAppointmentsQuery {
            participant: Participant::Client(client_id.clone()),
            now,
            skip: 0,
            limit: 3,
        };
        let page = ctx.repos.appointments.find_upcoming(&query).await.unwrap();
        assert_eq!(
            page.iter().map(|a| a.start_ts).collect::<Vec<_>>(),
            vec![now + HOUR, now + 2 * HOUR, now + 3 * HOUR]
        );
        query.skip = 3;
        let page = ctx.repos.appointments.find_upcoming(&query).await.unwrap();
        assert_eq!(page.len(), 2);

        query.participant = Participant::Lawyer(lawyer_id.clone());
        query.skip = 0;
        query.limit = 10;
        let page = ctx.repos.appointments.find_upcoming(&query).await.unwrap();
        assert_eq!(page.len(), 5);

        query.participant = Participant::Lawyer(client_id);
        assert!(ctx.repos.appointments.find_upcoming(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn marks_reminders_as_sent() {
        let ctx = BookingContext::create_inmemory();
        let now = 100 * HOUR;
        let a = appointment(&ID::new(), now + 24 * HOUR, now + 25 * HOUR, AppointmentStatus::Confirmed);
        let closed = appointment(&ID::new(), now + 24 * HOUR, now + 25 * HOUR, AppointmentStatus::Rejected);
        let later = appointment(&ID::new(), now + 48 * HOUR, now + 49 * HOUR, AppointmentStatus::Pending);
        for appointment in &[&a, &closed, &later] {
            ctx.repos.appointments.insert(appointment).await.unwrap();
        }
        let repo = &ctx.repos.appointments;

        let candidates = repo.find_reminder_candidates(now, now + 25 * HOUR).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, a.id);

        repo.mark_reminder_sent(&a.id, ReminderKind::Day, now)
            .await
            .unwrap();
        let res = repo.find(&a.id).await.unwrap();
        assert!(res.day_reminder_sent);
        assert!(!res.hour_reminder_sent);
        assert_eq!(res.updated, now);
    }
}

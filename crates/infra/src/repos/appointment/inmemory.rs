use super::{IAppointmentRepo, Participant, UpcomingAppointmentsQuery};
use crate::repos::shared::inmemory_repo::*;
use lawyer_booking_domain::{Appointment, AppointmentStatus, ReminderKind, TimeSpan, ID};

pub struct InMemoryAppointmentRepo {
    appointments: std::sync::Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self {
            appointments: std::sync::Mutex::new(vec![]),
        }
    }
}

fn blocks_timespan(appointment: &Appointment, lawyer_id: &ID, timespan: &TimeSpan) -> bool {
    appointment.lawyer_id == *lawyer_id
        && appointment.status.blocks_time()
        && appointment.timespan().overlaps(timespan)
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        insert(appointment, &self.appointments);
        Ok(())
    }

    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()> {
        save(appointment, &self.appointments);
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        find(appointment_id, &self.appointments)
    }

    async fn find_overlapping(
        &self,
        lawyer_id: &ID,
        timespan: &TimeSpan,
    ) -> anyhow::Result<Vec<Appointment>> {
        Ok(find_by(&self.appointments, |a| {
            blocks_timespan(a, lawyer_id, timespan)
        }))
    }

    async fn count_overlapping(
        &self,
        lawyer_id: &ID,
        timespan: &TimeSpan,
        ignore: Option<&ID>,
    ) -> anyhow::Result<i64> {
        let overlapping = find_by(&self.appointments, |a| {
            blocks_timespan(a, lawyer_id, timespan) && Some(&a.id) != ignore
        });
        Ok(overlapping.len() as i64)
    }

    async fn find_upcoming(
        &self,
        query: &UpcomingAppointmentsQuery,
    ) -> anyhow::Result<Vec<Appointment>> {
        let mut appointments = find_by(&self.appointments, |a| {
            let participates = match &query.participant {
                Participant::Client(client_id) => a.client_id == *client_id,
                Participant::Lawyer(lawyer_id) => a.lawyer_id == *lawyer_id,
            };
            participates && a.status != AppointmentStatus::Cancelled && a.end_ts > query.now
        });
        appointments.sort_by_key(|a| a.start_ts);

        Ok(appointments
            .into_iter()
            .skip(query.skip.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .collect())
    }

    async fn find_reminder_candidates(
        &self,
        now: i64,
        until: i64,
    ) -> anyhow::Result<Vec<Appointment>> {
        Ok(find_by(&self.appointments, |a| {
            a.status.is_active()
                && a.start_ts > now
                && a.start_ts < until
                && !(a.day_reminder_sent && a.hour_reminder_sent)
        }))
    }

    async fn cancel_stale_pending(&self, started_before: i64, now: i64) -> anyhow::Result<u64> {
        Ok(update_many(
            &self.appointments,
            |a| a.status == AppointmentStatus::Pending && a.start_ts <= started_before,
            |a| {
                a.status = AppointmentStatus::Cancelled;
                a.updated = now;
            },
        ))
    }

    async fn complete_started_confirmed(&self, now: i64) -> anyhow::Result<u64> {
        Ok(update_many(
            &self.appointments,
            |a| a.status == AppointmentStatus::Confirmed && a.start_ts <= now,
            |a| {
                a.status = AppointmentStatus::Completed;
                a.updated = now;
            },
        ))
    }

    async fn mark_reminder_sent(
        &self,
        appointment_id: &ID,
        reminder: ReminderKind,
        now: i64,
    ) -> anyhow::Result<()> {
        update_many(
            &self.appointments,
            |a| a.id == *appointment_id,
            |a| {
                match reminder {
                    ReminderKind::Day => a.day_reminder_sent = true,
                    ReminderKind::Hour => a.hour_reminder_sent = true,
                }
                a.updated = now;
            },
        );
        Ok(())
    }
}

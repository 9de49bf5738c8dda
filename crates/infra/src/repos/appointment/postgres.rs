use super::{IAppointmentRepo, Participant, UpcomingAppointmentsQuery};
use anyhow::anyhow;
use lawyer_booking_domain::{Appointment, AppointmentStatus, ReminderKind, TimeSpan, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};
use tracing::error;

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRaw {
    appointment_uid: Uuid,
    client_uid: Uuid,
    lawyer_uid: Uuid,
    description: Option<String>,
    start_ts: i64,
    end_ts: i64,
    status: String,
    meeting_link: Option<String>,
    notes: Option<String>,
    chat_enabled: bool,
    reject_reason: Option<String>,
    cancel_reason: Option<String>,
    admin_reason: Option<String>,
    day_reminder_sent: bool,
    hour_reminder_sent: bool,
    created: i64,
    updated: i64,
}

impl TryFrom<AppointmentRaw> for Appointment {
    type Error = anyhow::Error;

    fn try_from(raw: AppointmentRaw) -> anyhow::Result<Self> {
        let status = raw
            .status
            .parse::<AppointmentStatus>()
            .map_err(|e| anyhow!("Appointment {}: {}", raw.appointment_uid, e))?;
        Ok(Self {
            id: raw.appointment_uid.into(),
            client_id: raw.client_uid.into(),
            lawyer_id: raw.lawyer_uid.into(),
            description: raw.description,
            start_ts: raw.start_ts,
            end_ts: raw.end_ts,
            status,
            meeting_link: raw.meeting_link,
            notes: raw.notes,
            chat_enabled: raw.chat_enabled,
            reject_reason: raw.reject_reason,
            cancel_reason: raw.cancel_reason,
            admin_reason: raw.admin_reason,
            day_reminder_sent: raw.day_reminder_sent,
            hour_reminder_sent: raw.hour_reminder_sent,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

fn to_appointments(rows: Vec<AppointmentRaw>) -> anyhow::Result<Vec<Appointment>> {
    rows.into_iter().map(|row| row.try_into()).collect()
}

// Statuses that no longer occupy the time of the lawyer
const FREED_STATUSES: &str = "('cancelled', 'rejected')";

#[async_trait::async_trait]
impl IAppointmentRepo for PostgresAppointmentRepo {
    async fn insert(&self, a: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments(
                appointment_uid,
                client_uid,
                lawyer_uid,
                description,
                start_ts,
                end_ts,
                status,
                meeting_link,
                notes,
                chat_enabled,
                reject_reason,
                cancel_reason,
                admin_reason,
                day_reminder_sent,
                hour_reminder_sent,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(a.id.inner_ref())
        .bind(a.client_id.inner_ref())
        .bind(a.lawyer_id.inner_ref())
        .bind(&a.description)
        .bind(a.start_ts)
        .bind(a.end_ts)
        .bind(a.status.as_str())
        .bind(&a.meeting_link)
        .bind(&a.notes)
        .bind(a.chat_enabled)
        .bind(&a.reject_reason)
        .bind(&a.cancel_reason)
        .bind(&a.admin_reason)
        .bind(a.day_reminder_sent)
        .bind(a.hour_reminder_sent)
        .bind(a.created)
        .bind(a.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, a: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE appointments SET
                client_uid = $2,
                lawyer_uid = $3,
                description = $4,
                start_ts = $5,
                end_ts = $6,
                status = $7,
                meeting_link = $8,
                notes = $9,
                chat_enabled = $10,
                reject_reason = $11,
                cancel_reason = $12,
                admin_reason = $13,
                day_reminder_sent = $14,
                hour_reminder_sent = $15,
                updated = $16
            WHERE appointment_uid = $1
            "#,
        )
        .bind(a.id.inner_ref())
        .bind(a.client_id.inner_ref())
        .bind(a.lawyer_id.inner_ref())
        .bind(&a.description)
        .bind(a.start_ts)
        .bind(a.end_ts)
        .bind(a.status.as_str())
        .bind(&a.meeting_link)
        .bind(&a.notes)
        .bind(a.chat_enabled)
        .bind(&a.reject_reason)
        .bind(&a.cancel_reason)
        .bind(&a.admin_reason)
        .bind(a.day_reminder_sent)
        .bind(a.hour_reminder_sent)
        .bind(a.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        let raw = sqlx::query_as::<_, AppointmentRaw>(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.appointment_uid = $1
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()??;

        match raw.try_into() {
            Ok(appointment) => Some(appointment),
            Err(e) => {
                error!("Unable to read stored appointment. Error: {:?}", e);
                None
            }
        }
    }

    async fn find_overlapping(
        &self,
        lawyer_id: &ID,
        timespan: &TimeSpan,
    ) -> anyhow::Result<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentRaw>(&format!(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.lawyer_uid = $1
            AND a.status NOT IN {}
            AND a.start_ts < $3
            AND a.end_ts > $2
            ORDER BY a.start_ts
            "#,
            FREED_STATUSES
        ))
        .bind(lawyer_id.inner_ref())
        .bind(timespan.start())
        .bind(timespan.end())
        .fetch_all(&self.pool)
        .await?;

        to_appointments(rows)
    }

    async fn count_overlapping(
        &self,
        lawyer_id: &ID,
        timespan: &TimeSpan,
        ignore: Option<&ID>,
    ) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(&format!(
            r#"
            SELECT COUNT(*) FROM appointments AS a
            WHERE a.lawyer_uid = $1
            AND a.status NOT IN {}
            AND a.start_ts < $3
            AND a.end_ts > $2
            AND ($4::uuid IS NULL OR a.appointment_uid <> $4)
            "#,
            FREED_STATUSES
        ))
        .bind(lawyer_id.inner_ref())
        .bind(timespan.start())
        .bind(timespan.end())
        .bind(ignore.map(|id| *id.inner_ref()))
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn find_upcoming(
        &self,
        query: &UpcomingAppointmentsQuery,
    ) -> anyhow::Result<Vec<Appointment>> {
        let (column, participant_id) = match &query.participant {
            Participant::Client(id) => ("client_uid", id),
            Participant::Lawyer(id) => ("lawyer_uid", id),
        };
        let rows = sqlx::query_as::<_, AppointmentRaw>(&format!(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.{} = $1
            AND a.status <> 'cancelled'
            AND a.end_ts > $2
            ORDER BY a.start_ts ASC
            LIMIT $3
            OFFSET $4
            "#,
            column
        ))
        .bind(participant_id.inner_ref())
        .bind(query.now)
        .bind(query.limit)
        .bind(query.skip)
        .fetch_all(&self.pool)
        .await?;

        to_appointments(rows)
    }

    async fn find_reminder_candidates(
        &self,
        now: i64,
        until: i64,
    ) -> anyhow::Result<Vec<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentRaw>(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.status IN ('pending', 'confirmed')
            AND a.start_ts > $1
            AND a.start_ts < $2
            AND (a.day_reminder_sent = FALSE OR a.hour_reminder_sent = FALSE)
            "#,
        )
        .bind(now)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        to_appointments(rows)
    }

    async fn cancel_stale_pending(&self, started_before: i64, now: i64) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE appointments SET
                status = 'cancelled',
                updated = $2
            WHERE status = 'pending'
            AND start_ts <= $1
            "#,
        )
        .bind(started_before)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }

    async fn complete_started_confirmed(&self, now: i64) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE appointments SET
                status = 'completed',
                updated = $1
            WHERE status = 'confirmed'
            AND start_ts <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }

    async fn mark_reminder_sent(
        &self,
        appointment_id: &ID,
        reminder: ReminderKind,
        now: i64,
    ) -> anyhow::Result<()> {
        let column = match reminder {
            ReminderKind::Day => "day_reminder_sent",
            ReminderKind::Hour => "hour_reminder_sent",
        };
        sqlx::query(&format!(
            r#"
            UPDATE appointments SET
                {} = TRUE,
                updated = $2
            WHERE appointment_uid = $1
            "#,
            column
        ))
        .bind(appointment_id.inner_ref())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

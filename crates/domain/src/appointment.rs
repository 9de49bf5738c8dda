use crate::{
    shared::entity::{Entity, ID},
    timespan::TimeSpan,
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Lifecycle label of an `Appointment`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Rejected,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Whether an `Appointment` with this status occupies the time
    /// of the `Lawyer`. Cancelled and rejected appointments free it up.
    pub fn blocks_time(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::Rejected)
    }

    /// Whether the `Appointment` is still going to take place
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid appointment status: {0}")]
pub struct InvalidStatusError(String);

impl FromStr for AppointmentStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(InvalidStatusError(s.to_string())),
        }
    }
}

/// A meeting booked by a client with a `Lawyer`
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: ID,
    /// The user who booked this `Appointment`
    pub client_id: ID,
    pub lawyer_id: ID,
    pub description: Option<String>,
    pub start_ts: i64,
    pub end_ts: i64,
    pub status: AppointmentStatus,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub chat_enabled: bool,
    pub reject_reason: Option<String>,
    pub cancel_reason: Option<String>,
    pub admin_reason: Option<String>,
    /// Set once the reminder one day before the start has been delivered
    pub day_reminder_sent: bool,
    /// Set once the reminder one hour before the start has been delivered
    pub hour_reminder_sent: bool,
    pub created: i64,
    pub updated: i64,
}

impl Appointment {
    pub fn new(client_id: ID, lawyer_id: ID, start_ts: i64, end_ts: i64, now: i64) -> Self {
        Self {
            id: Default::default(),
            client_id,
            lawyer_id,
            description: None,
            start_ts,
            end_ts,
            status: AppointmentStatus::Pending,
            meeting_link: None,
            notes: None,
            chat_enabled: false,
            reject_reason: None,
            cancel_reason: None,
            admin_reason: None,
            day_reminder_sent: false,
            hour_reminder_sent: false,
            created: now,
            updated: now,
        }
    }

    pub fn timespan(&self) -> TimeSpan {
        TimeSpan::new(self.start_ts, self.end_ts)
    }
}

impl Entity for Appointment {
    fn id(&self) -> &ID {
        &self.id
    }
}

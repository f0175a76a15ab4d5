//! Derived reminder events.
//!
//! # Invariants
//! - Events are created fresh on every matcher invocation and never stored.
//! - Wire shape is `{type, title, message, timestamp}`; owner and reminder key
//!   stay in-process.

use crate::model::profile::UserId;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const MEDICATION_TITLE: &str = "Medication Reminder";
pub const APPOINTMENT_TITLE: &str = "Appointment Reminder";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Medication,
    Appointment,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medication => "medication",
            Self::Appointment => "appointment",
        }
    }
}

/// Ephemeral signal that a schedule or appointment is due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationEvent {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(rename = "timestamp")]
    pub occurred_at: NaiveDateTime,
    /// Owner of the record that produced this event.
    #[serde(skip)]
    pub owner_id: UserId,
    /// Correlation key, e.g. `schedule:7:2024-03-01:08:00`. Not a dedup key:
    /// nothing remembers fired events.
    #[serde(skip)]
    pub reminder_key: String,
}

//! Appointment model.

use crate::model::profile::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned appointment identifier.
pub type AppointmentId = i64;

/// Dated eye-care visit record, past or future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub owner_id: UserId,
    pub last_checkup_date: Option<NaiveDate>,
    pub next_appointment_date: NaiveDate,
    pub notes: Option<String>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Client-supplied fields for create and full-replacement update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppointmentInput {
    #[serde(default)]
    pub last_checkup_date: Option<NaiveDate>,
    pub next_appointment_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

//! Domain model for eye-care records and derived reminders.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - Users are identified by a stable `UserId`; schedules and appointments
//!   by store-assigned integer ids.
//! - `NotificationEvent` values are derived and never persisted.

pub mod appointment;
pub mod notification;
pub mod profile;
pub mod schedule;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level validation failure raised before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trimming.
    EmptyField(&'static str),
    /// Dose frequency is outside `1..=4`.
    FrequencyOutOfRange(u8),
    /// Number of time-of-day entries is outside `1..=6`.
    TimesOfDayCount(usize),
    /// Time-of-day entry is not a 24-hour `HH:MM` value.
    InvalidTimeOfDay(String),
    /// Email does not look like `local@domain`.
    InvalidEmail(String),
    /// Password has fewer characters than the given minimum.
    PasswordTooShort(usize),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::FrequencyOutOfRange(value) => {
                write!(f, "frequency must be between 1 and 4 doses per day, got {value}")
            }
            Self::TimesOfDayCount(count) => {
                write!(f, "times_of_day must contain 1 to 6 entries, got {count}")
            }
            Self::InvalidTimeOfDay(value) => {
                write!(f, "invalid time of day `{value}`; expected HH:MM")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
            Self::PasswordTooShort(min) => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl Error for ValidationError {}

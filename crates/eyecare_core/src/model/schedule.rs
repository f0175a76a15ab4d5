//! Medication (eye-drop) schedule model.
//!
//! # Invariants
//! - `frequency` is within `1..=4` doses per day.
//! - `times_of_day` holds 1 to 6 zero-padded 24-hour `HH:MM` strings, kept in
//!   caller order. Duplicates are preserved.
//! - `times_of_day.len() >= frequency` is a convention only and is not
//!   enforced.

use crate::model::profile::UserId;
use crate::model::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TIME_OF_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));

pub const MIN_FREQUENCY: u8 = 1;
pub const MAX_FREQUENCY: u8 = 4;
pub const MAX_TIMES_OF_DAY: usize = 6;

/// Store-assigned schedule identifier.
pub type ScheduleId = i64;

/// Recurring daily dosing plan owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationSchedule {
    pub id: ScheduleId,
    pub owner_id: UserId,
    pub medication_name: String,
    /// Doses per day.
    pub frequency: u8,
    pub times_of_day: Vec<String>,
    pub notes: Option<String>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Client-supplied fields for create and full-replacement update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleInput {
    pub medication_name: String,
    pub frequency: u8,
    pub times_of_day: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ScheduleInput {
    /// Trims text fields and drops blank time slots.
    ///
    /// Clients submit one slot per form row, so empty rows are expected and
    /// are not an error.
    pub fn normalized(&self) -> Self {
        Self {
            medication_name: self.medication_name.trim().to_string(),
            frequency: self.frequency,
            times_of_day: self
                .times_of_day
                .iter()
                .map(|time| time.trim())
                .filter(|time| !time.is_empty())
                .map(str::to_string)
                .collect(),
            notes: crate::model::profile::non_blank(self.notes.as_deref()),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.medication_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("medication_name"));
        }
        if !(MIN_FREQUENCY..=MAX_FREQUENCY).contains(&self.frequency) {
            return Err(ValidationError::FrequencyOutOfRange(self.frequency));
        }
        let count = self.times_of_day.len();
        if count == 0 || count > MAX_TIMES_OF_DAY {
            return Err(ValidationError::TimesOfDayCount(count));
        }
        if let Some(bad) = self
            .times_of_day
            .iter()
            .find(|time| !is_valid_time_of_day(time))
        {
            return Err(ValidationError::InvalidTimeOfDay(bad.clone()));
        }
        Ok(())
    }
}

/// Returns whether `value` is a zero-padded 24-hour `HH:MM` string.
pub fn is_valid_time_of_day(value: &str) -> bool {
    TIME_OF_DAY_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_time_of_day, ScheduleInput};
    use crate::model::ValidationError;

    fn input(times: &[&str]) -> ScheduleInput {
        ScheduleInput {
            medication_name: "Latanoprost".to_string(),
            frequency: 2,
            times_of_day: times.iter().map(|time| time.to_string()).collect(),
            notes: None,
        }
    }

    #[test]
    fn time_of_day_requires_zero_padding_and_24h_range() {
        assert!(is_valid_time_of_day("08:00"));
        assert!(is_valid_time_of_day("23:59"));
        assert!(!is_valid_time_of_day("8:00"));
        assert!(!is_valid_time_of_day("24:00"));
        assert!(!is_valid_time_of_day("12:60"));
        assert!(!is_valid_time_of_day("noon"));
    }

    #[test]
    fn normalized_drops_blank_slots() {
        let normalized = input(&["08:00", "", "  ", "20:00"]).normalized();
        assert_eq!(normalized.times_of_day, vec!["08:00", "20:00"]);
    }

    #[test]
    fn validate_rejects_frequency_out_of_range() {
        let mut schedule = input(&["08:00"]);
        schedule.frequency = 5;
        assert_eq!(
            schedule.validate().unwrap_err(),
            ValidationError::FrequencyOutOfRange(5)
        );
    }

    #[test]
    fn validate_rejects_too_many_times() {
        let schedule = input(&["01:00", "02:00", "03:00", "04:00", "05:00", "06:00", "07:00"]);
        assert_eq!(
            schedule.validate().unwrap_err(),
            ValidationError::TimesOfDayCount(7)
        );
    }

    #[test]
    fn validate_keeps_duplicates() {
        input(&["08:00", "08:00"]).validate().unwrap();
    }
}

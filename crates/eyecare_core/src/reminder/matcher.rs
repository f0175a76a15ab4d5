//! Pure reminder matcher.
//!
//! # Invariants
//! - Output depends only on `(now, schedules, appointments)`.
//! - A schedule fires at most once per minute, even when `times_of_day` holds
//!   the current minute more than once.
//! - Appointment events fire only for `days_until` 0 (today) or 1 (tomorrow).
//! - Order: medication events in schedule order, then appointment events in
//!   appointment order. No sorting.

use crate::model::appointment::Appointment;
use crate::model::notification::{
    NotificationEvent, NotificationKind, APPOINTMENT_TITLE, MEDICATION_TITLE,
};
use crate::model::schedule::MedicationSchedule;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Computes the notification events due at `now`.
pub fn match_reminders(
    now: NaiveDateTime,
    schedules: &[MedicationSchedule],
    appointments: &[Appointment],
) -> Vec<NotificationEvent> {
    let minute = current_minute(now);
    let today = now.date();

    let medication = schedules
        .iter()
        .filter(|schedule| schedule.times_of_day.iter().any(|time| *time == minute))
        .map(|schedule| NotificationEvent {
            kind: NotificationKind::Medication,
            title: MEDICATION_TITLE.to_string(),
            message: format!("Time to take {}", schedule.medication_name),
            occurred_at: now,
            owner_id: schedule.owner_id,
            reminder_key: format!("schedule:{}:{today}:{minute}", schedule.id),
        });

    let appointment = appointments.iter().filter_map(|appointment| {
        let when = match days_until(appointment.next_appointment_date, now) {
            0 => "today",
            1 => "tomorrow",
            _ => return None,
        };
        Some(NotificationEvent {
            kind: NotificationKind::Appointment,
            title: APPOINTMENT_TITLE.to_string(),
            message: format!("Eye appointment {when}"),
            occurred_at: now,
            owner_id: appointment.owner_id,
            reminder_key: format!(
                "appointment:{}:{}",
                appointment.id, appointment.next_appointment_date
            ),
        })
    });

    medication.chain(appointment).collect()
}

/// Formats `now` as a zero-padded 24-hour `HH:MM`.
pub fn current_minute(now: NaiveDateTime) -> String {
    now.format("%H:%M").to_string()
}

/// Whole days from `now` until the start of `date`, rounded up.
///
/// Any instant during the day before `date` yields 1; any instant during
/// `date` itself yields 0; earlier dates are negative.
pub fn days_until(date: NaiveDate, now: NaiveDateTime) -> i64 {
    let diff = date.and_time(NaiveTime::MIN) - now;
    let whole_days = diff.num_days();
    if diff > Duration::days(whole_days) {
        whole_days + 1
    } else {
        whole_days
    }
}

#[cfg(test)]
mod tests {
    use super::{current_minute, days_until};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn current_minute_is_zero_padded() {
        assert_eq!(current_minute(at("2024-03-01T08:05:59")), "08:05");
        assert_eq!(current_minute(at("2024-03-01T00:00:00")), "00:00");
    }

    #[test]
    fn days_until_rounds_up_partial_days() {
        assert_eq!(days_until(date("2024-03-02"), at("2024-03-01T09:00:00")), 1);
        assert_eq!(days_until(date("2024-03-02"), at("2024-03-01T00:00:00")), 1);
        assert_eq!(days_until(date("2024-03-02"), at("2024-03-01T23:59:59")), 1);
        assert_eq!(days_until(date("2024-03-03"), at("2024-03-01T23:59:59")), 2);
    }

    #[test]
    fn days_until_is_zero_during_the_day_itself() {
        assert_eq!(days_until(date("2024-03-01"), at("2024-03-01T00:00:00")), 0);
        assert_eq!(days_until(date("2024-03-01"), at("2024-03-01T18:30:00")), 0);
    }

    #[test]
    fn days_until_is_negative_for_past_dates() {
        assert_eq!(days_until(date("2024-02-29"), at("2024-03-01T08:00:00")), -1);
        assert_eq!(days_until(date("2024-02-28"), at("2024-03-01T08:00:00")), -2);
    }
}

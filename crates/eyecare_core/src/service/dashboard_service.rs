//! Dashboard summary: today's dosing status and the next appointment.
//!
//! # Invariants
//! - `next_time` is the first entry later than the current minute in string
//!   order, falling back to the first entry (tomorrow's first dose).
//! - `due_now` uses the same exact-minute comparison as the reminder matcher.

use crate::model::appointment::Appointment;
use crate::model::profile::UserId;
use crate::model::schedule::{MedicationSchedule, ScheduleId};
use crate::reminder::matcher::{current_minute, days_until};
use crate::repo::appointment_repo::AppointmentRepository;
use crate::repo::schedule_repo::ScheduleRepository;
use crate::repo::RepoResult;
use crate::service::appointment_service::AppointmentService;
use crate::service::schedule_service::ScheduleService;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Dosing status of one schedule at a given minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleStatus {
    pub schedule_id: ScheduleId,
    pub medication_name: String,
    pub times_of_day: Vec<String>,
    pub next_time: Option<String>,
    pub due_now: bool,
}

/// Next upcoming appointment with its day distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingAppointment {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub days_until: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub schedules: Vec<ScheduleStatus>,
    pub next_appointment: Option<UpcomingAppointment>,
}

/// Builds dashboard summaries from schedule and appointment repositories.
pub struct DashboardService<S: ScheduleRepository, A: AppointmentRepository> {
    schedules: ScheduleService<S>,
    appointments: AppointmentService<A>,
}

impl<S: ScheduleRepository, A: AppointmentRepository> DashboardService<S, A> {
    pub fn new(schedule_repo: S, appointment_repo: A) -> Self {
        Self {
            schedules: ScheduleService::new(schedule_repo),
            appointments: AppointmentService::new(appointment_repo),
        }
    }

    pub fn dashboard(&self, owner: UserId, now: NaiveDateTime) -> RepoResult<Dashboard> {
        let minute = current_minute(now);
        let schedules = self
            .schedules
            .list_schedules(owner)?
            .iter()
            .map(|schedule| schedule_status(schedule, &minute))
            .collect();

        let next_appointment = self
            .appointments
            .next_appointment(owner, now.date())?
            .map(|appointment| UpcomingAppointment {
                days_until: days_until(appointment.next_appointment_date, now),
                appointment,
            });

        Ok(Dashboard {
            schedules,
            next_appointment,
        })
    }
}

/// Computes the dosing status of `schedule` at `minute` (`HH:MM`).
pub fn schedule_status(schedule: &MedicationSchedule, minute: &str) -> ScheduleStatus {
    let times = &schedule.times_of_day;
    let next_time = times
        .iter()
        .find(|time| time.as_str() > minute)
        .or_else(|| times.first())
        .cloned();

    ScheduleStatus {
        schedule_id: schedule.id,
        medication_name: schedule.medication_name.clone(),
        times_of_day: times.clone(),
        next_time,
        due_now: times.iter().any(|time| time == minute),
    }
}

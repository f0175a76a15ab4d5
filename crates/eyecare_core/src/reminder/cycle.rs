//! Reminder cycles: load a snapshot, run the matcher, hand events back.
//!
//! # Invariants
//! - Background cycles read every owner with a 1-day appointment window.
//! - On-demand cycles read one owner with a 7-day appointment window.
//! - A failed load abandons the cycle; there is no retry and no backfill.

use crate::model::notification::NotificationEvent;
use crate::model::profile::UserId;
use crate::reminder::matcher::match_reminders;
use crate::reminder::source::ReminderSource;
use crate::repo::{DateWindow, OwnerScope, RepoResult};
use chrono::NaiveDateTime;
use log::{debug, error};
use std::time::Instant;

/// Appointment window, in days after today, for the background cycle.
pub const BACKGROUND_WINDOW_DAYS: u32 = 1;
/// Appointment window, in days after today, for the on-demand cycle.
pub const ON_DEMAND_WINDOW_DAYS: u32 = 7;

/// Which caller a reminder cycle runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderCycle {
    /// Process-wide minute ticker over all users.
    Background,
    /// One authenticated user's poll.
    OnDemand(UserId),
}

impl ReminderCycle {
    pub fn scope(self) -> OwnerScope {
        match self {
            Self::Background => OwnerScope::AllUsers,
            Self::OnDemand(user) => OwnerScope::User(user),
        }
    }

    pub fn window_days(self) -> u32 {
        match self {
            Self::Background => BACKGROUND_WINDOW_DAYS,
            Self::OnDemand(_) => ON_DEMAND_WINDOW_DAYS,
        }
    }

    pub fn appointment_window(self, now: NaiveDateTime) -> DateWindow {
        DateWindow::days_from(now.date(), self.window_days())
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::OnDemand(_) => "on_demand",
        }
    }
}

/// Runs reminder cycles against an injected `ReminderSource`.
pub struct ReminderService<S: ReminderSource> {
    source: S,
}

impl<S: ReminderSource> ReminderService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Loads the cycle's snapshot and returns the events due at `now`.
    ///
    /// # Errors
    /// - Returns the source error unchanged when either load fails.
    pub fn run(
        &self,
        cycle: ReminderCycle,
        now: NaiveDateTime,
    ) -> RepoResult<Vec<NotificationEvent>> {
        let started_at = Instant::now();
        let scope = cycle.scope();

        let snapshot = self.source.load_schedules(scope).and_then(|schedules| {
            let appointments = self
                .source
                .load_appointments(scope, cycle.appointment_window(now))?;
            Ok((schedules, appointments))
        });
        let (schedules, appointments) = match snapshot {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!(
                    "event=reminder_cycle module=reminder status=error cycle={} scope={} duration_ms={} error={}",
                    cycle.name(),
                    scope.label(),
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        let events = match_reminders(now, &schedules, &appointments);
        debug!(
            "event=reminder_cycle module=reminder status=ok cycle={} scope={} schedules={} appointments={} fired={} duration_ms={}",
            cycle.name(),
            scope.label(),
            schedules.len(),
            appointments.len(),
            events.len(),
            started_at.elapsed().as_millis()
        );
        Ok(events)
    }
}

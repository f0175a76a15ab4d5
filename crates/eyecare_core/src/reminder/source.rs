//! Data-access boundary for reminder cycles.
//!
//! Cycles never open connections or pick tables themselves; they receive a
//! `ReminderSource` and ask it for an `OwnerScope`.

use crate::model::appointment::Appointment;
use crate::model::schedule::MedicationSchedule;
use crate::repo::appointment_repo::{
    AppointmentListQuery, AppointmentRepository, SqliteAppointmentRepository,
};
use crate::repo::schedule_repo::{ScheduleRepository, SqliteScheduleRepository};
use crate::repo::{DateWindow, OwnerScope, RepoResult};
use rusqlite::Connection;

/// Read-only snapshot loader used by reminder cycles.
pub trait ReminderSource {
    fn load_schedules(&self, scope: OwnerScope) -> RepoResult<Vec<MedicationSchedule>>;
    fn load_appointments(
        &self,
        scope: OwnerScope,
        window: DateWindow,
    ) -> RepoResult<Vec<Appointment>>;
}

impl<T: ReminderSource + ?Sized> ReminderSource for &T {
    fn load_schedules(&self, scope: OwnerScope) -> RepoResult<Vec<MedicationSchedule>> {
        (**self).load_schedules(scope)
    }

    fn load_appointments(
        &self,
        scope: OwnerScope,
        window: DateWindow,
    ) -> RepoResult<Vec<Appointment>> {
        (**self).load_appointments(scope, window)
    }
}

/// `ReminderSource` over the SQLite schedule and appointment repositories.
pub struct SqliteReminderSource<'conn> {
    schedules: SqliteScheduleRepository<'conn>,
    appointments: SqliteAppointmentRepository<'conn>,
}

impl<'conn> SqliteReminderSource<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            schedules: SqliteScheduleRepository::new(conn),
            appointments: SqliteAppointmentRepository::new(conn),
        }
    }
}

impl ReminderSource for SqliteReminderSource<'_> {
    fn load_schedules(&self, scope: OwnerScope) -> RepoResult<Vec<MedicationSchedule>> {
        self.schedules.list_schedules(scope)
    }

    fn load_appointments(
        &self,
        scope: OwnerScope,
        window: DateWindow,
    ) -> RepoResult<Vec<Appointment>> {
        self.appointments.list_appointments(&AppointmentListQuery {
            scope,
            window: Some(window),
        })
    }
}

//! Appointment use-case service.

use crate::model::appointment::{Appointment, AppointmentId, AppointmentInput};
use crate::model::profile::{non_blank, UserId};
use crate::repo::appointment_repo::{AppointmentListQuery, AppointmentRepository};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;

/// Owner-scoped appointment CRUD.
pub struct AppointmentService<R: AppointmentRepository> {
    repo: R,
}

impl<R: AppointmentRepository> AppointmentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_appointment(
        &self,
        owner: UserId,
        input: &AppointmentInput,
    ) -> RepoResult<Appointment> {
        self.repo.create_appointment(owner, &normalize(input))
    }

    /// Lists the owner's appointments, earliest next date first.
    pub fn list_appointments(&self, owner: UserId) -> RepoResult<Vec<Appointment>> {
        self.repo
            .list_appointments(&AppointmentListQuery::all_for(owner))
    }

    pub fn get_appointment(&self, owner: UserId, id: AppointmentId) -> RepoResult<Appointment> {
        self.repo
            .get_appointment(owner, id)?
            .ok_or_else(|| RepoError::not_found("appointment", id))
    }

    pub fn update_appointment(
        &self,
        owner: UserId,
        id: AppointmentId,
        input: &AppointmentInput,
    ) -> RepoResult<Appointment> {
        self.repo.update_appointment(owner, id, &normalize(input))
    }

    pub fn delete_appointment(&self, owner: UserId, id: AppointmentId) -> RepoResult<()> {
        self.repo.delete_appointment(owner, id)
    }

    /// Earliest appointment on or after `today`, if any.
    pub fn next_appointment(
        &self,
        owner: UserId,
        today: NaiveDate,
    ) -> RepoResult<Option<Appointment>> {
        let appointments = self.list_appointments(owner)?;
        Ok(appointments
            .into_iter()
            .find(|appointment| appointment.next_appointment_date >= today))
    }
}

fn normalize(input: &AppointmentInput) -> AppointmentInput {
    AppointmentInput {
        last_checkup_date: input.last_checkup_date,
        next_appointment_date: input.next_appointment_date,
        notes: non_blank(input.notes.as_deref()),
    }
}

//! Medication schedule use-case service.

use crate::model::profile::UserId;
use crate::model::schedule::{MedicationSchedule, ScheduleId, ScheduleInput};
use crate::repo::schedule_repo::ScheduleRepository;
use crate::repo::{OwnerScope, RepoError, RepoResult};

/// Owner-scoped schedule CRUD.
pub struct ScheduleService<R: ScheduleRepository> {
    repo: R,
}

impl<R: ScheduleRepository> ScheduleService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a schedule after dropping blank time slots.
    pub fn create_schedule(
        &self,
        owner: UserId,
        input: &ScheduleInput,
    ) -> RepoResult<MedicationSchedule> {
        self.repo.create_schedule(owner, &input.normalized())
    }

    /// Lists the owner's schedules, newest first.
    pub fn list_schedules(&self, owner: UserId) -> RepoResult<Vec<MedicationSchedule>> {
        self.repo.list_schedules(OwnerScope::User(owner))
    }

    pub fn get_schedule(&self, owner: UserId, id: ScheduleId) -> RepoResult<MedicationSchedule> {
        self.repo
            .get_schedule(owner, id)?
            .ok_or_else(|| RepoError::not_found("schedule", id))
    }

    /// Replaces name, frequency, times and notes of an existing schedule.
    pub fn update_schedule(
        &self,
        owner: UserId,
        id: ScheduleId,
        input: &ScheduleInput,
    ) -> RepoResult<MedicationSchedule> {
        self.repo.update_schedule(owner, id, &input.normalized())
    }

    pub fn delete_schedule(&self, owner: UserId, id: ScheduleId) -> RepoResult<()> {
        self.repo.delete_schedule(owner, id)
    }
}

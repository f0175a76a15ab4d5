//! Medication schedule repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD over `medication_schedules`.
//! - Serialize `times_of_day` as a JSON array column.
//!
//! # Invariants
//! - Write paths call `ScheduleInput::validate()` before SQL mutations.
//! - Lists are ordered newest first (`created_at DESC, id DESC`).
//! - Read paths reject malformed persisted rows instead of masking them.

use crate::model::profile::UserId;
use crate::model::schedule::{MedicationSchedule, ScheduleId, ScheduleInput};
use crate::repo::{parse_uuid, OwnerScope, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const SCHEDULE_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    medication_name,
    frequency,
    times_of_day,
    notes,
    created_at
FROM medication_schedules";

/// Repository interface for medication schedules.
pub trait ScheduleRepository {
    fn create_schedule(&self, owner: UserId, input: &ScheduleInput)
        -> RepoResult<MedicationSchedule>;
    fn get_schedule(&self, owner: UserId, id: ScheduleId)
        -> RepoResult<Option<MedicationSchedule>>;
    fn list_schedules(&self, scope: OwnerScope) -> RepoResult<Vec<MedicationSchedule>>;
    fn update_schedule(
        &self,
        owner: UserId,
        id: ScheduleId,
        input: &ScheduleInput,
    ) -> RepoResult<MedicationSchedule>;
    fn delete_schedule(&self, owner: UserId, id: ScheduleId) -> RepoResult<()>;
}

/// SQLite-backed schedule repository.
pub struct SqliteScheduleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteScheduleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_back(&self, owner: UserId, id: ScheduleId) -> RepoResult<MedicationSchedule> {
        self.get_schedule(owner, id)?
            .ok_or_else(|| RepoError::not_found("schedule", id))
    }
}

impl ScheduleRepository for SqliteScheduleRepository<'_> {
    fn create_schedule(
        &self,
        owner: UserId,
        input: &ScheduleInput,
    ) -> RepoResult<MedicationSchedule> {
        input.validate()?;

        self.conn.execute(
            "INSERT INTO medication_schedules (
                owner_id,
                medication_name,
                frequency,
                times_of_day,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                owner.to_string(),
                input.medication_name.as_str(),
                i64::from(input.frequency),
                encode_times(&input.times_of_day)?,
                input.notes.as_deref(),
            ],
        )?;

        self.read_back(owner, self.conn.last_insert_rowid())
    }

    fn get_schedule(
        &self,
        owner: UserId,
        id: ScheduleId,
    ) -> RepoResult<Option<MedicationSchedule>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SCHEDULE_SELECT_SQL} WHERE id = ?1 AND owner_id = ?2;"
        ))?;
        let row = stmt
            .query_row(params![id, owner.to_string()], |row| {
                Ok(parse_schedule_row(row))
            })
            .optional()?;
        row.transpose()
    }

    fn list_schedules(&self, scope: OwnerScope) -> RepoResult<Vec<MedicationSchedule>> {
        let mut sql = SCHEDULE_SELECT_SQL.to_string();
        let mut bind_values: Vec<Value> = Vec::new();

        if let OwnerScope::User(owner) = scope {
            sql.push_str(" WHERE owner_id = ?");
            bind_values.push(Value::Text(owner.to_string()));
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut schedules = Vec::new();
        while let Some(row) = rows.next()? {
            schedules.push(parse_schedule_row(row)?);
        }
        Ok(schedules)
    }

    fn update_schedule(
        &self,
        owner: UserId,
        id: ScheduleId,
        input: &ScheduleInput,
    ) -> RepoResult<MedicationSchedule> {
        input.validate()?;

        let changed = self.conn.execute(
            "UPDATE medication_schedules
             SET
                medication_name = ?1,
                frequency = ?2,
                times_of_day = ?3,
                notes = ?4
             WHERE id = ?5 AND owner_id = ?6;",
            params![
                input.medication_name.as_str(),
                i64::from(input.frequency),
                encode_times(&input.times_of_day)?,
                input.notes.as_deref(),
                id,
                owner.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("schedule", id));
        }
        self.read_back(owner, id)
    }

    fn delete_schedule(&self, owner: UserId, id: ScheduleId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM medication_schedules WHERE id = ?1 AND owner_id = ?2;",
            params![id, owner.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("schedule", id));
        }
        Ok(())
    }
}

fn encode_times(times: &[String]) -> RepoResult<String> {
    serde_json::to_string(times)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode times_of_day: {err}")))
}

fn parse_schedule_row(row: &Row<'_>) -> RepoResult<MedicationSchedule> {
    let owner_text: String = row.get("owner_id")?;
    let owner_id = parse_uuid(&owner_text, "medication_schedules.owner_id")?;

    let frequency_raw: i64 = row.get("frequency")?;
    let frequency = u8::try_from(frequency_raw).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid frequency `{frequency_raw}` in medication_schedules.frequency"
        ))
    })?;

    let times_text: String = row.get("times_of_day")?;
    let times_of_day: Vec<String> = serde_json::from_str(&times_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid times_of_day `{times_text}` in medication_schedules.times_of_day"
        ))
    })?;

    Ok(MedicationSchedule {
        id: row.get("id")?,
        owner_id,
        medication_name: row.get("medication_name")?,
        frequency,
        times_of_day,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

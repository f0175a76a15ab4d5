//! Appointment repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Dates are stored as ISO `YYYY-MM-DD` text, so lexical comparison in SQL
//!   matches calendar order.
//! - Lists are ordered by `next_appointment_date ASC, id ASC`.

use crate::model::appointment::{Appointment, AppointmentId, AppointmentInput};
use crate::model::profile::UserId;
use crate::repo::{
    format_date, parse_date, parse_uuid, DateWindow, OwnerScope, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const APPOINTMENT_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    last_checkup_date,
    next_appointment_date,
    notes,
    created_at
FROM appointments";

/// Filter for appointment list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentListQuery {
    pub scope: OwnerScope,
    /// Restricts `next_appointment_date` to the inclusive window when set.
    pub window: Option<DateWindow>,
}

impl AppointmentListQuery {
    pub fn all_for(owner: UserId) -> Self {
        Self {
            scope: OwnerScope::User(owner),
            window: None,
        }
    }
}

/// Repository interface for appointments.
pub trait AppointmentRepository {
    fn create_appointment(&self, owner: UserId, input: &AppointmentInput)
        -> RepoResult<Appointment>;
    fn get_appointment(&self, owner: UserId, id: AppointmentId)
        -> RepoResult<Option<Appointment>>;
    fn list_appointments(&self, query: &AppointmentListQuery) -> RepoResult<Vec<Appointment>>;
    fn update_appointment(
        &self,
        owner: UserId,
        id: AppointmentId,
        input: &AppointmentInput,
    ) -> RepoResult<Appointment>;
    fn delete_appointment(&self, owner: UserId, id: AppointmentId) -> RepoResult<()>;
}

/// SQLite-backed appointment repository.
pub struct SqliteAppointmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAppointmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_back(&self, owner: UserId, id: AppointmentId) -> RepoResult<Appointment> {
        self.get_appointment(owner, id)?
            .ok_or_else(|| RepoError::not_found("appointment", id))
    }
}

impl AppointmentRepository for SqliteAppointmentRepository<'_> {
    fn create_appointment(
        &self,
        owner: UserId,
        input: &AppointmentInput,
    ) -> RepoResult<Appointment> {
        self.conn.execute(
            "INSERT INTO appointments (
                owner_id,
                last_checkup_date,
                next_appointment_date,
                notes
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                owner.to_string(),
                input.last_checkup_date.map(format_date),
                format_date(input.next_appointment_date),
                input.notes.as_deref(),
            ],
        )?;

        self.read_back(owner, self.conn.last_insert_rowid())
    }

    fn get_appointment(
        &self,
        owner: UserId,
        id: AppointmentId,
    ) -> RepoResult<Option<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{APPOINTMENT_SELECT_SQL} WHERE id = ?1 AND owner_id = ?2;"
        ))?;
        let row = stmt
            .query_row(params![id, owner.to_string()], |row| {
                Ok(parse_appointment_row(row))
            })
            .optional()?;
        row.transpose()
    }

    fn list_appointments(&self, query: &AppointmentListQuery) -> RepoResult<Vec<Appointment>> {
        let mut sql = format!("{APPOINTMENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let OwnerScope::User(owner) = query.scope {
            sql.push_str(" AND owner_id = ?");
            bind_values.push(Value::Text(owner.to_string()));
        }

        if let Some(window) = query.window {
            sql.push_str(" AND next_appointment_date >= ? AND next_appointment_date <= ?");
            bind_values.push(Value::Text(format_date(window.start)));
            bind_values.push(Value::Text(format_date(window.end)));
        }

        sql.push_str(" ORDER BY next_appointment_date ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut appointments = Vec::new();
        while let Some(row) = rows.next()? {
            appointments.push(parse_appointment_row(row)?);
        }
        Ok(appointments)
    }

    fn update_appointment(
        &self,
        owner: UserId,
        id: AppointmentId,
        input: &AppointmentInput,
    ) -> RepoResult<Appointment> {
        let changed = self.conn.execute(
            "UPDATE appointments
             SET
                last_checkup_date = ?1,
                next_appointment_date = ?2,
                notes = ?3
             WHERE id = ?4 AND owner_id = ?5;",
            params![
                input.last_checkup_date.map(format_date),
                format_date(input.next_appointment_date),
                input.notes.as_deref(),
                id,
                owner.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("appointment", id));
        }
        self.read_back(owner, id)
    }

    fn delete_appointment(&self, owner: UserId, id: AppointmentId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM appointments WHERE id = ?1 AND owner_id = ?2;",
            params![id, owner.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("appointment", id));
        }
        Ok(())
    }
}

fn parse_appointment_row(row: &Row<'_>) -> RepoResult<Appointment> {
    let owner_text: String = row.get("owner_id")?;
    let next_text: String = row.get("next_appointment_date")?;
    let last_checkup_date = match row.get::<_, Option<String>>("last_checkup_date")? {
        Some(value) => Some(parse_date(&value, "appointments.last_checkup_date")?),
        None => None,
    };

    Ok(Appointment {
        id: row.get("id")?,
        owner_id: parse_uuid(&owner_text, "appointments.owner_id")?,
        last_checkup_date,
        next_appointment_date: parse_date(&next_text, "appointments.next_appointment_date")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

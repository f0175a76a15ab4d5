//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes validate input before persistence.
//! - Every schedule/appointment read or write is filtered by owner, except
//!   reads made under `OwnerScope::AllUsers`.
//! - Repository APIs return semantic errors (`NotFound`, `Conflict`) in
//!   addition to DB transport errors.

pub mod appointment_repo;
pub mod profile_repo;
pub mod schedule_repo;

use crate::db::DbError;
use crate::model::profile::UserId;
use crate::model::ValidationError;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: String },
    /// Write rejected by a uniqueness constraint.
    Conflict(String),
    InvalidData(String),
    /// Password hashing or hash parsing failed.
    Credential(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Credential(message) => write!(f, "credential processing failed: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::Conflict(_)
            | Self::InvalidData(_)
            | Self::Credential(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Identity boundary under which records are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    /// Records owned by one user.
    User(UserId),
    /// Records of every user. Only the background reminder cycle uses this.
    AllUsers,
}

impl OwnerScope {
    /// Stable log label: the user id or `all`.
    pub fn label(&self) -> String {
        match self {
            Self::User(id) => id.to_string(),
            Self::AllUsers => "all".to_string(),
        }
    }
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window `[start, start + days]`.
    pub fn days_from(start: NaiveDate, days: u32) -> Self {
        let end = start
            .checked_add_days(chrono::Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn parse_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date value `{value}` in {column}")))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::{parse_date, DateWindow, RepoError};
    use chrono::NaiveDate;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let window = DateWindow::days_from(date("2024-02-28"), 1);
        assert_eq!(window.end, date("2024-02-29"));
        assert!(window.contains(date("2024-02-28")));
        assert!(window.contains(date("2024-02-29")));
        assert!(!window.contains(date("2024-03-01")));
        assert!(!window.contains(date("2024-02-27")));
    }

    #[test]
    fn parse_date_reports_column_on_failure() {
        let err = parse_date("03/01/2024", "appointments.next_appointment_date").unwrap_err();
        match err {
            RepoError::InvalidData(message) => {
                assert!(message.contains("appointments.next_appointment_date"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

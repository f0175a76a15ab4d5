//! User profile and session repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Emails are stored normalized (trimmed, lowercase); duplicates surface as
//!   `RepoError::Conflict`.
//! - Access tokens are looked up by exact match only; a deleted session
//!   token never resolves again.

use crate::model::profile::{non_blank, normalize_email, ProfileUpdate, UserId, UserProfile};
use crate::repo::{is_unique_violation, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROFILE_SELECT_SQL: &str = "SELECT
    users.id AS id,
    users.full_name AS full_name,
    users.email AS email,
    users.phone_number AS phone_number,
    users.created_at AS created_at
FROM users";

/// Stored sign-in secret for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub password_hash: String,
}

/// Repository interface for user profiles and their sessions.
pub trait ProfileRepository {
    fn create_profile(&self, profile: &UserProfile, password_hash: &str) -> RepoResult<UserId>;
    fn get_profile(&self, id: UserId) -> RepoResult<Option<UserProfile>>;
    fn find_credentials(&self, email: &str) -> RepoResult<Option<StoredCredentials>>;
    fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> RepoResult<()>;
    fn create_session(&self, user_id: UserId, access_token: &str) -> RepoResult<()>;
    /// Returns `false` when the token had no session.
    fn delete_session(&self, access_token: &str) -> RepoResult<bool>;
    fn find_by_access_token(&self, access_token: &str) -> RepoResult<Option<UserProfile>>;
}

/// SQLite-backed profile repository.
pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn create_profile(&self, profile: &UserProfile, password_hash: &str) -> RepoResult<UserId> {
        let email = normalize_email(&profile.email);
        let result = self.conn.execute(
            "INSERT INTO users (id, full_name, email, phone_number, password_hash)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                profile.id.to_string(),
                profile.full_name.trim(),
                email,
                non_blank(profile.phone_number.as_deref()),
                password_hash,
            ],
        );

        match result {
            Ok(_) => Ok(profile.id),
            Err(err) if is_unique_violation(&err) => Err(RepoError::Conflict(format!(
                "email `{email}` is already registered"
            ))),
            Err(err) => Err(err.into()),
        }
    }

    fn get_profile(&self, id: UserId) -> RepoResult<Option<UserProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROFILE_SELECT_SQL} WHERE users.id = ?1;"))?;
        let row = stmt
            .query_row([id.to_string()], |row| Ok(parse_profile_row(row)))
            .optional()?;
        row.transpose()
    }

    fn find_credentials(&self, email: &str) -> RepoResult<Option<StoredCredentials>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, password_hash FROM users WHERE email = ?1;",
                [normalize_email(email)],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        row.map(|(id_text, password_hash)| {
            Ok(StoredCredentials {
                user_id: parse_uuid(&id_text, "users.id")?,
                password_hash,
            })
        })
        .transpose()
    }

    fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> RepoResult<()> {
        update.validate()?;

        let changed = self.conn.execute(
            "UPDATE users SET full_name = ?1, phone_number = ?2 WHERE id = ?3;",
            params![
                update.full_name.trim(),
                non_blank(update.phone_number.as_deref()),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("user", id));
        }
        Ok(())
    }

    fn create_session(&self, user_id: UserId, access_token: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO user_sessions (access_token, user_id) VALUES (?1, ?2);",
            params![access_token, user_id.to_string()],
        )?;
        Ok(())
    }

    fn delete_session(&self, access_token: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM user_sessions WHERE access_token = ?1;",
            [access_token],
        )?;
        Ok(changed > 0)
    }

    fn find_by_access_token(&self, access_token: &str) -> RepoResult<Option<UserProfile>> {
        if access_token.is_empty() {
            return Ok(None);
        }
        let mut stmt = self.conn.prepare(&format!(
            "{PROFILE_SELECT_SQL}
             JOIN user_sessions ON user_sessions.user_id = users.id
             WHERE user_sessions.access_token = ?1;"
        ))?;
        let row = stmt
            .query_row([access_token], |row| Ok(parse_profile_row(row)))
            .optional()?;
        row.transpose()
    }
}

fn parse_profile_row(row: &Row<'_>) -> RepoResult<UserProfile> {
    let id_text: String = row.get("id")?;
    Ok(UserProfile {
        id: parse_uuid(&id_text, "users.id")?,
        full_name: row.get("full_name")?,
        email: row.get("email")?,
        phone_number: row.get("phone_number")?,
        created_at: row.get("created_at")?,
    })
}

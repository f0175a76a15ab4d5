//! User profile model.
//!
//! # Invariants
//! - `id` is stable and never reused for another user.
//! - `email` is unique across profiles (enforced by storage).
//! - Passwords never leave the write path; only their argon2 hash is stored.

use crate::model::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Stable identifier for a registered user.
pub type UserId = Uuid;

/// Registered user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Minimum password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Input for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProfile {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Email and password presented at sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A profile together with a freshly issued access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedIn {
    pub profile: UserProfile,
    pub access_token: String,
}

/// Mutable profile fields. Email is fixed after registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl NewProfile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_full_name(&self.full_name)?;
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_CHARS));
        }
        Ok(())
    }
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_full_name(&self.full_name)
    }
}

/// Lowercases and trims an email for storage and lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Maps blank optional text to `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    if full_name.trim().is_empty() {
        return Err(ValidationError::EmptyField("full_name"));
    }
    Ok(())
}

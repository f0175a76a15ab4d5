//! Profile use-case service: registration, sign-in, sessions, profile edits.
//!
//! # Invariants
//! - Every registration gets a fresh `UserId` and a first session.
//! - Every successful sign-in issues a new access token; earlier tokens of the
//!   same user stay valid until signed out.
//! - Unknown email and wrong password are indistinguishable to callers.

use crate::model::profile::{
    Credentials, NewProfile, ProfileUpdate, SignedIn, UserId, UserProfile,
};
use crate::repo::profile_repo::ProfileRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::password::{hash_password, verify_password};
use log::info;
use uuid::Uuid;

const ACCESS_TOKEN_PREFIX: &str = "ec_";

/// Use-case service wrapper for user profiles.
pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a user and signs them in.
    pub fn register(&self, input: &NewProfile) -> RepoResult<SignedIn> {
        input.validate()?;

        let profile = UserProfile {
            id: Uuid::new_v4(),
            full_name: input.full_name.clone(),
            email: input.email.clone(),
            phone_number: input.phone_number.clone(),
            created_at: 0,
        };
        let password_hash = hash_password(&input.password)?;
        let id = self.repo.create_profile(&profile, &password_hash)?;
        info!("event=user_register module=service status=ok user_id={id}");
        self.issue_session(id)
    }

    /// Exchanges email and password for a new access token.
    ///
    /// Returns `None` when the email is unknown or the password is wrong.
    pub fn sign_in(&self, credentials: &Credentials) -> RepoResult<Option<SignedIn>> {
        let Some(stored) = self.repo.find_credentials(&credentials.email)? else {
            info!("event=user_sign_in module=service status=rejected reason=unknown_email");
            return Ok(None);
        };
        if !verify_password(&credentials.password, &stored.password_hash)? {
            info!(
                "event=user_sign_in module=service status=rejected reason=bad_password user_id={}",
                stored.user_id
            );
            return Ok(None);
        }

        let signed_in = self.issue_session(stored.user_id)?;
        info!(
            "event=user_sign_in module=service status=ok user_id={}",
            stored.user_id
        );
        Ok(Some(signed_in))
    }

    /// Revokes one access token. Returns `false` if it was not active.
    pub fn sign_out(&self, access_token: &str) -> RepoResult<bool> {
        let revoked = self.repo.delete_session(access_token.trim())?;
        info!("event=user_sign_out module=service status=ok revoked={revoked}");
        Ok(revoked)
    }

    /// Resolves a bearer token to its owner.
    pub fn authenticate(&self, access_token: &str) -> RepoResult<Option<UserProfile>> {
        self.repo.find_by_access_token(access_token.trim())
    }

    pub fn get_profile(&self, id: UserId) -> RepoResult<UserProfile> {
        self.repo
            .get_profile(id)?
            .ok_or_else(|| RepoError::not_found("user", id))
    }

    /// Replaces the mutable profile fields and returns the stored profile.
    pub fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> RepoResult<UserProfile> {
        self.repo.update_profile(id, update)?;
        self.get_profile(id)
    }

    fn issue_session(&self, id: UserId) -> RepoResult<SignedIn> {
        let access_token = generate_access_token();
        self.repo.create_session(id, &access_token)?;
        Ok(SignedIn {
            profile: self.get_profile(id)?,
            access_token,
        })
    }
}

fn generate_access_token() -> String {
    format!("{ACCESS_TOKEN_PREFIX}{}", Uuid::new_v4().simple())
}

//! Bearer-token authentication extractor.
//!
//! Handlers that take an [`AuthUser`] only run for requests carrying
//! `Authorization: Bearer <access_token>` with an active session, issued at
//! registration or sign-in.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use eyecare_core::{ProfileService, SqliteProfileRepository, UserId};
use log::debug;

/// Authenticated caller resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    /// Token the request was authenticated with; sign-out revokes it.
    pub access_token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let access_token = bearer_token(&parts.headers)?;
        let lookup_token = access_token.clone();
        let profile = state
            .with_conn(move |conn| {
                ProfileService::new(SqliteProfileRepository::new(conn)).authenticate(&lookup_token)
            })
            .await?;

        match profile {
            Some(profile) => Ok(Self {
                id: profile.id,
                access_token,
            }),
            None => {
                debug!("event=auth module=http status=rejected reason=unknown_token");
                Err(ApiError::Unauthorized("Invalid access token".to_string()))
            }
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization header".to_string()))
}

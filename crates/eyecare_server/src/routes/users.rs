//! Registration, sign-in and profile endpoints.

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use eyecare_core::{
    Credentials, NewProfile, ProfileService, ProfileUpdate, SignedIn, SqliteProfileRepository,
    UserProfile,
};

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<NewProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<SignedIn>), ApiError> {
    let Json(input) = payload?;
    let signed_in = state
        .with_conn(move |conn| {
            ProfileService::new(SqliteProfileRepository::new(conn)).register(&input)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(signed_in)))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<SignedIn>, ApiError> {
    let Json(credentials) = payload?;
    state
        .with_conn(move |conn| {
            ProfileService::new(SqliteProfileRepository::new(conn)).sign_in(&credentials)
        })
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))
}

pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .with_conn(move |conn| {
            ProfileService::new(SqliteProfileRepository::new(conn)).sign_out(&user.access_token)
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "Signed out successfully",
    }))
}

pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state
        .with_conn(move |conn| {
            ProfileService::new(SqliteProfileRepository::new(conn)).get_profile(user.id)
        })
        .await?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<UserProfile>, ApiError> {
    let Json(update) = payload?;
    let profile = state
        .with_conn(move |conn| {
            ProfileService::new(SqliteProfileRepository::new(conn)).update_profile(user.id, &update)
        })
        .await?;
    Ok(Json(profile))
}

//! Medication schedule endpoints, scoped to the caller.

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eyecare_core::{
    MedicationSchedule, ScheduleId, ScheduleInput, ScheduleService, SqliteScheduleRepository,
};

pub async fn list_schedules(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<MedicationSchedule>>, ApiError> {
    let schedules = state
        .with_conn(move |conn| {
            ScheduleService::new(SqliteScheduleRepository::new(conn)).list_schedules(user.id)
        })
        .await?;
    Ok(Json(schedules))
}

pub async fn create_schedule(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ScheduleInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MedicationSchedule>), ApiError> {
    let Json(input) = payload?;
    let schedule = state
        .with_conn(move |conn| {
            ScheduleService::new(SqliteScheduleRepository::new(conn))
                .create_schedule(user.id, &input)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

pub async fn update_schedule(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<ScheduleId>, PathRejection>,
    payload: Result<Json<ScheduleInput>, JsonRejection>,
) -> Result<Json<MedicationSchedule>, ApiError> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let schedule = state
        .with_conn(move |conn| {
            ScheduleService::new(SqliteScheduleRepository::new(conn))
                .update_schedule(user.id, id, &input)
        })
        .await?;
    Ok(Json(schedule))
}

pub async fn delete_schedule(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<ScheduleId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    state
        .with_conn(move |conn| {
            ScheduleService::new(SqliteScheduleRepository::new(conn)).delete_schedule(user.id, id)
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "Schedule deleted successfully",
    }))
}

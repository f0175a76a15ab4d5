//! Appointment endpoints, scoped to the caller.

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eyecare_core::{
    Appointment, AppointmentId, AppointmentInput, AppointmentService,
    SqliteAppointmentRepository,
};

pub async fn list_appointments(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let appointments = state
        .with_conn(move |conn| {
            AppointmentService::new(SqliteAppointmentRepository::new(conn))
                .list_appointments(user.id)
        })
        .await?;
    Ok(Json(appointments))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<AppointmentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let Json(input) = payload?;
    let appointment = state
        .with_conn(move |conn| {
            AppointmentService::new(SqliteAppointmentRepository::new(conn))
                .create_appointment(user.id, &input)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn update_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<AppointmentId>, PathRejection>,
    payload: Result<Json<AppointmentInput>, JsonRejection>,
) -> Result<Json<Appointment>, ApiError> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let appointment = state
        .with_conn(move |conn| {
            AppointmentService::new(SqliteAppointmentRepository::new(conn))
                .update_appointment(user.id, id, &input)
        })
        .await?;
    Ok(Json(appointment))
}

pub async fn delete_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<AppointmentId>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    state
        .with_conn(move |conn| {
            AppointmentService::new(SqliteAppointmentRepository::new(conn))
                .delete_appointment(user.id, id)
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "Appointment deleted successfully",
    }))
}

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use eyecare_core::{
    Dashboard, DashboardService, SqliteAppointmentRepository, SqliteScheduleRepository,
};

pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Dashboard>, ApiError> {
    let now = state.clock().now();
    let dashboard = state
        .with_conn(move |conn| {
            DashboardService::new(
                SqliteScheduleRepository::new(conn),
                SqliteAppointmentRepository::new(conn),
            )
            .dashboard(user.id, now)
        })
        .await?;
    Ok(Json(dashboard))
}

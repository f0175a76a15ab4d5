use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use eyecare_core::{NotificationEvent, ReminderCycle, ReminderService, SqliteReminderSource};

/// Reminders due for the caller at the current minute.
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<NotificationEvent>>, ApiError> {
    let now = state.clock().now();
    let events = state
        .with_conn(move |conn| {
            ReminderService::new(SqliteReminderSource::new(conn))
                .run(ReminderCycle::OnDemand(user.id), now)
        })
        .await?;
    Ok(Json(events))
}

//! HTTP routes.

mod appointments;
mod dashboard;
mod health;
mod notifications;
mod schedules;
mod users;

use crate::state::AppState;
use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

/// Confirmation body for deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/users/register", post(users::register))
        .route("/api/users/login", post(users::login))
        .route("/api/users/logout", post(users::logout))
        .route(
            "/api/users/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route(
            "/api/schedules",
            get(schedules::list_schedules).post(schedules::create_schedule),
        )
        .route(
            "/api/schedules/{id}",
            put(schedules::update_schedule).delete(schedules::delete_schedule),
        )
        .route(
            "/api/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/api/appointments/{id}",
            put(appointments::update_appointment).delete(appointments::delete_appointment),
        )
        .route("/api/notifications", get(notifications::list_notifications))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .with_state(state)
}

/// CORS policy allowing the browser client at `frontend_origin`.
pub fn cors_layer(frontend_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(frontend_origin)?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any))
}

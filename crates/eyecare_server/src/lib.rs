//! HTTP server for the eye-care reminder service.
//!
//! Wires `eyecare_core` services to axum routes and runs the background
//! reminder ticker.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod ticker;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{cors_layer, router as build_router};
pub use state::AppState;
pub use ticker::{run_background_cycle, spawn_reminder_ticker};

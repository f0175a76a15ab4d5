//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep HTTP/CLI layers decoupled from storage details.

pub mod appointment_service;
pub mod dashboard_service;
pub mod password;
pub mod profile_service;
pub mod schedule_service;

//! Core domain logic for the eye-care reminder service.
//! This crate owns the record model, storage, and reminder matching; the
//! server and CLI crates only wire transport around it.

pub mod db;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::appointment::{Appointment, AppointmentId, AppointmentInput};
pub use model::notification::{NotificationEvent, NotificationKind};
pub use model::profile::{
    Credentials, NewProfile, ProfileUpdate, SignedIn, UserId, UserProfile,
};
pub use model::schedule::{MedicationSchedule, ScheduleId, ScheduleInput};
pub use model::ValidationError;
pub use reminder::clock::{Clock, FixedClock, SystemClock};
pub use reminder::cycle::{ReminderCycle, ReminderService};
pub use reminder::matcher::match_reminders;
pub use reminder::source::{ReminderSource, SqliteReminderSource};
pub use repo::appointment_repo::{
    AppointmentListQuery, AppointmentRepository, SqliteAppointmentRepository,
};
pub use repo::profile_repo::{
    ProfileRepository, SqliteProfileRepository, StoredCredentials,
};
pub use repo::schedule_repo::{ScheduleRepository, SqliteScheduleRepository};
pub use repo::{DateWindow, OwnerScope, RepoError, RepoResult};
pub use service::appointment_service::AppointmentService;
pub use service::dashboard_service::{Dashboard, DashboardService};
pub use service::profile_service::ProfileService;
pub use service::schedule_service::ScheduleService;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

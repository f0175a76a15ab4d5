//! Reminder matching and reminder cycles.
//!
//! # Responsibility
//! - Decide which schedules/appointments are due at a given minute
//!   (`matcher`, pure).
//! - Load the snapshot a cycle needs through an injected `ReminderSource` and
//!   run the matcher over it (`cycle`).
//!
//! # Invariants
//! - Matching is exact on the `HH:MM` minute; there is no tolerance window.
//! - Nothing remembers fired events. Two invocations inside the same minute
//!   fire the same events twice.

pub mod clock;
pub mod cycle;
pub mod matcher;
pub mod source;

//! Background reminder ticker.
//!
//! # Responsibility
//! - Run the background reminder cycle on a fixed period.
//! - Deliver each fired event as one log line tagged with its owner.
//!
//! # Invariants
//! - The first tick lands on the next wall-clock minute boundary.
//! - Missed ticks are skipped, never back-filled.
//! - A failed cycle is logged and abandoned; the next tick runs normally.

use crate::state::AppState;
use chrono::{NaiveDateTime, Timelike};
use eyecare_core::{NotificationEvent, ReminderCycle, ReminderService, SqliteReminderSource};
use log::{error, info};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Spawns the ticker; it stops when `shutdown` flips to `true` or its
/// sender is dropped.
pub fn spawn_reminder_ticker(
    state: AppState,
    period: Duration,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(run_ticker(state, period, shutdown))
}

async fn run_ticker(state: AppState, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let first_tick = Instant::now() + delay_to_next_minute(state.clock().now());
    let mut interval = tokio::time::interval_at(first_tick, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(
        "event=reminder_ticker module=ticker status=started period_secs={}",
        period.as_secs()
    );
    loop {
        tokio::select! {
            _ = interval.tick() => {
                run_background_cycle(&state).await;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    info!("event=reminder_ticker module=ticker status=stopped");
}

/// Runs one background cycle and logs every fired event.
///
/// Returns the delivered events; an abandoned cycle delivers none.
pub async fn run_background_cycle(state: &AppState) -> Vec<NotificationEvent> {
    let now = state.clock().now();
    let result = state
        .with_conn(move |conn| {
            ReminderService::new(SqliteReminderSource::new(conn))
                .run(ReminderCycle::Background, now)
        })
        .await;

    match result {
        Ok(events) => {
            for event in &events {
                info!(
                    "event=reminder_fired module=ticker status=ok kind={} owner_id={} key={} title={:?} message={:?}",
                    event.kind.as_str(),
                    event.owner_id,
                    event.reminder_key,
                    event.title,
                    event.message
                );
            }
            events
        }
        Err(err) => {
            error!("event=reminder_tick module=ticker status=abandoned at={now} error={err}");
            Vec::new()
        }
    }
}

/// Time from `now` until the start of the next wall-clock minute.
///
/// Exactly on a boundary the delay is zero.
pub fn delay_to_next_minute(now: NaiveDateTime) -> Duration {
    // Leap seconds report nanosecond() >= 1e9; clamp into the minute.
    let into_minute_ms = (u64::from(now.second()) * 1_000
        + u64::from(now.nanosecond()) / 1_000_000)
        .min(59_999);
    if into_minute_ms == 0 {
        Duration::ZERO
    } else {
        Duration::from_millis(60_000 - into_minute_ms)
    }
}

//! Command-line entry point for the eye-care core.
//!
//! # Responsibility
//! - Verify `eyecare_core` linkage (`ping`, `version`).
//! - Run a reminder cycle against a database file at an arbitrary minute.

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use eyecare_core::db::open_db;
use eyecare_core::{NotificationEvent, ReminderCycle, ReminderService, SqliteReminderSource, UserId};
use serde::Serialize;
use std::path::{Path, PathBuf};

const AT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Parser)]
#[command(name = "eyecare")]
#[command(about = "Eye-care reminder tooling")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the core library is linked
    Ping,

    /// Print the core library version
    Version,

    /// Print the reminders due at a minute, one JSON object per line
    Remind {
        /// Existing SQLite database file
        #[arg(long, env = "EYECARE_DB_PATH")]
        db: PathBuf,

        /// Local time to evaluate, `YYYY-MM-DDTHH:MM` (defaults to now)
        #[arg(long, value_parser = parse_at)]
        at: Option<NaiveDateTime>,

        /// Run the on-demand cycle for one user instead of the background cycle
        #[arg(long)]
        user: Option<UserId>,
    },
}

#[derive(Serialize)]
struct ReminderLine<'a> {
    owner_id: UserId,
    reminder_key: &'a str,
    #[serde(flatten)]
    event: &'a NotificationEvent,
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Command::Ping => println!("eyecare_core ping={}", eyecare_core::ping()),
        Command::Version => println!("eyecare_core version={}", eyecare_core::core_version()),
        Command::Remind { db, at, user } => {
            ensure_database_exists(&db)?;
            let conn = open_db(&db)
                .with_context(|| format!("failed to open database `{}`", db.display()))?;
            let now = at.unwrap_or_else(|| Local::now().naive_local());
            let cycle = user.map_or(ReminderCycle::Background, ReminderCycle::OnDemand);

            let events = ReminderService::new(SqliteReminderSource::new(&conn))
                .run(cycle, now)
                .context("reminder cycle failed")?;
            for event in &events {
                let line = ReminderLine {
                    owner_id: event.owner_id,
                    reminder_key: &event.reminder_key,
                    event,
                };
                println!("{}", serde_json::to_string(&line)?);
            }
        }
    }
    Ok(())
}

/// `open_db` creates missing files; a mistyped path must not yield an empty store.
fn ensure_database_exists(path: &Path) -> anyhow::Result<()> {
    if !path.is_file() {
        anyhow::bail!("database file `{}` does not exist", path.display());
    }
    Ok(())
}

fn parse_at(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value.trim(), AT_FORMAT)
        .map_err(|err| format!("expected {AT_FORMAT}: {err}"))
}

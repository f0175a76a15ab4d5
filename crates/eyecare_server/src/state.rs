//! Shared application state.
//!
//! # Invariants
//! - The SQLite connection is only touched on blocking worker threads.
//! - The connection lock is never held across an `.await`.
//! - A panic inside one storage operation does not take the connection down
//!   for later requests; open transactions roll back when they unwind.

use eyecare_core::{Clock, RepoError};
use log::warn;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};

/// Failure to run a storage operation on the shared connection.
#[derive(Debug, thiserror::Error)]
pub enum StoreAccessError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("database task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(conn: Connection, clock: Arc<dyn Clock>) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            clock,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Runs `op` against the connection on the blocking pool.
    pub async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreAccessError>
    where
        F: FnOnce(&Connection) -> Result<T, RepoError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db.lock().unwrap_or_else(|poisoned| {
                warn!("event=db_lock module=state status=recovered reason=poisoned");
                db.clear_poison();
                PoisonError::into_inner(poisoned)
            });
            op(&conn).map_err(StoreAccessError::from)
        })
        .await?
    }
}

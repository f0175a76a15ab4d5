use anyhow::Context;
use eyecare_core::db::open_db;
use eyecare_core::{init_logging, SystemClock};
use eyecare_server::{build_router, cors_layer, spawn_reminder_ticker, AppState, ServerConfig};
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("invalid server configuration")?;
    init_logging(&config.log_level, &config.log_dir.to_string_lossy())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let state = AppState::new(conn, Arc::new(SystemClock));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ticker = spawn_reminder_ticker(state.clone(), config.reminder_interval, shutdown_rx);

    let app = build_router(state).layer(
        cors_layer(&config.frontend_url)
            .with_context(|| format!("invalid frontend origin `{}`", config.frontend_url))?,
    );
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        "event=server_start module=server status=ok addr={} db_path={}",
        config.bind_addr,
        config.db_path.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Receiver may already be gone if the ticker exited.
    let _ = shutdown_tx.send(true);
    ticker.await.context("reminder ticker panicked")?;
    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=shutdown_signal module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}

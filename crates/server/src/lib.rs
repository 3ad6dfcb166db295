// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! intake: web front end for the request tracker.
//!
//! A public form accepts requests; an admin area behind a session login lists,
//! filters and updates them. Storage lives in `intake-core`.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use intake_core::db::DB_FILE_NAME;
use intake_core::Database;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{Error, Result};
pub use routes::router;
pub use state::AppState;

/// Dispatch a parsed command.
pub async fn run(command: Command) -> Result<()> {
    match command {
        Command::InitDb { data } => init_db(&data),
        Command::Serve {
            bind,
            data,
            config,
            verbose,
        } => {
            let config = Config::load(config.as_deref())?;
            init_logging(verbose || config.debug)?;
            serve(bind, &data, config).await
        }
    }
}

/// Create the schema in `data/requests.db` and report where it lives.
pub fn init_db(data_dir: &Path) -> Result<()> {
    let path = data_dir.join(DB_FILE_NAME);
    let db = Database::open(&path)?;
    let count = db.count_requests()?;
    println!("Database initialized: {}", path.display());
    if count > 0 {
        println!("  existing requests: {count}");
    }
    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Run the HTTP server until Ctrl-C or SIGTERM.
pub async fn serve(bind: SocketAddr, data_dir: &Path, config: Config) -> Result<()> {
    info!("Starting intake server");
    info!("  Bind address: {}", bind);
    info!("  Data directory: {}", data_dir.display());
    info!("  Debug: {}", config.debug);

    let state = AppState::open(data_dir, config)?;
    let app = router(state);

    let listener = TcpListener::bind(bind).await?;
    info!("Listening on: {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

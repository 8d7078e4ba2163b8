//! Server bootstrap.
//!
//! # Responsibility
//! - Open the configured record store and prepare the upload directory.
//! - Bind the listener and serve until interrupted.

use crate::routes::build_router;
use crate::state::AppState;
use graffiti_core::db::{open_store, DbError};
use graffiti_core::{AppConfig, ConfigError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Startup or serving failure.
#[derive(Debug)]
pub enum ServeError {
    Config(ConfigError),
    Logging(String),
    Db(DbError),
    Io(std::io::Error),
}

impl Display for ServeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Logging(message) => write!(f, "logging error: {message}"),
            Self::Db(err) => write!(f, "store error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl Error for ServeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(_) => None,
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ServeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for ServeError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<std::io::Error> for ServeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Serves the application described by `config` until Ctrl-C.
pub async fn run(config: AppConfig) -> Result<(), ServeError> {
    std::fs::create_dir_all(&config.upload_folder)?;
    let conn = open_store(&config.database)?;
    let app = build_router(AppState::new(conn), &config.upload_folder);

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    info!(
        "event=server_start module=web status=ok addr={} environment={:?} upload_folder={}",
        listener.local_addr()?,
        config.environment,
        config.upload_folder.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=web status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=server_signal module=web status=error error={}", err);
    }
}

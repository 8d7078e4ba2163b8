//! Environment-driven application configuration.
//!
//! # Responsibility
//! - Resolve the record store location from a connection string.
//! - Resolve the image upload directory, logging and listen settings.
//!
//! # Invariants
//! - Every setting has a fallback default; blank values count as unset.
//! - Only `sqlite` connection strings are accepted.
//! - `log_dir` is always absolute after loading.

use crate::logging::normalize_level;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_UPLOAD_FOLDER: &str = "UPLOAD_FOLDER";
pub const ENV_ENVIRONMENT: &str = "GRAFFITI_ENV";
pub const ENV_LOG_LEVEL: &str = "GRAFFITI_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GRAFFITI_LOG_DIR";
pub const ENV_BIND_ADDR: &str = "GRAFFITI_BIND_ADDR";

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///graffiti.db";
pub const DEFAULT_UPLOAD_FOLDER: &str = "static/images";
pub const DEFAULT_LOG_DIR_NAME: &str = "logs";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

static DATABASE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*)://(?P<rest>.*)$")
        .expect("valid database url regex")
});

/// Configuration loading error.
#[derive(Debug)]
pub enum ConfigError {
    UnsupportedDatabaseUrl(String),
    InvalidEnvironment(String),
    InvalidLogLevel(String),
    WorkingDirectory(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedDatabaseUrl(url) => {
                write!(f, "unsupported database url `{url}`; expected sqlite:///<path>")
            }
            Self::InvalidEnvironment(value) => write!(
                f,
                "unknown environment `{value}`; expected development|production"
            ),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::WorkingDirectory(err) => write!(f, "cannot resolve working directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WorkingDirectory(err) => Some(err),
            _ => None,
        }
    }
}

/// Deployment flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment(value.to_string())),
        }
    }

    /// Log level used when none is configured.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production => "info",
        }
    }
}

/// Where the record store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

/// Parses a store connection string.
///
/// Accepts `sqlite:///relative.db`, `sqlite:////absolute.db`,
/// `sqlite://` or `sqlite:///:memory:` for an in-memory store, and a bare
/// filesystem path.
pub fn parse_database_url(raw: &str) -> Result<DatabaseLocation, ConfigError> {
    let url = raw.trim();
    if url == ":memory:" {
        return Ok(DatabaseLocation::Memory);
    }

    let Some(captures) = DATABASE_URL_RE.captures(url) else {
        if url.is_empty() {
            return Err(ConfigError::UnsupportedDatabaseUrl(raw.to_string()));
        }
        return Ok(DatabaseLocation::File(PathBuf::from(url)));
    };

    if !captures["scheme"].eq_ignore_ascii_case("sqlite") {
        return Err(ConfigError::UnsupportedDatabaseUrl(raw.to_string()));
    }

    match &captures["rest"] {
        "" | ":memory:" | "/:memory:" => Ok(DatabaseLocation::Memory),
        rest => match rest.strip_prefix('/') {
            Some(path) if !path.is_empty() => Ok(DatabaseLocation::File(PathBuf::from(path))),
            _ => Err(ConfigError::UnsupportedDatabaseUrl(raw.to_string())),
        },
    }
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseLocation,
    pub upload_folder: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
    pub bind_addr: String,
}

impl AppConfig {
    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for unsupported connection strings, unknown
    /// environments or log levels, or an unreadable working directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        Self::from_lookup(|key| std::env::var(key).ok(), &cwd)
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Relative log directories are resolved against `cwd`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let environment = match read(ENV_ENVIRONMENT) {
            Some(value) => Environment::parse(&value)?,
            None => Environment::Development,
        };

        let database = parse_database_url(
            read(ENV_DATABASE_URL)
                .as_deref()
                .unwrap_or(DEFAULT_DATABASE_URL),
        )?;

        let upload_folder = PathBuf::from(
            read(ENV_UPLOAD_FOLDER).unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string()),
        );

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(value) => normalize_level(&value).map_err(ConfigError::InvalidLogLevel)?,
            None => environment.default_log_level(),
        };

        let log_dir = match read(ENV_LOG_DIR) {
            Some(value) => cwd.join(value),
            None => cwd.join(DEFAULT_LOG_DIR_NAME),
        };

        let bind_addr = read(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            environment,
            database,
            upload_folder,
            log_level,
            log_dir,
            bind_addr,
        })
    }
}

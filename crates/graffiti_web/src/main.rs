//! Web server entry point.

use graffiti_core::{init_logging, AppConfig};
use graffiti_web::{run, ServeError};

#[tokio::main]
async fn main() -> Result<(), ServeError> {
    // A missing .env file is normal outside development.
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    init_logging(config.log_level, &config.log_dir).map_err(ServeError::Logging)?;
    run(config).await
}

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::HRError;

/// The terminal belongs to the UI, so logs only go to `log_file`.
/// Without a file nothing is logged.
pub fn init_logging(log_file: Option<&Path>, default_level: &str) -> Result<(), HRError> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| HRError::LoggingFailed(e.to_string()))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| HRError::LoggingFailed(e.to_string()))
}

use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
    Registry,
};

use crate::error::{SeatingError, SeatingResult};

/// Logging configuration for the seating planner
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Daily-rolling log files go here when set
    pub log_dir: Option<PathBuf>,
    pub enable_json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            enable_json_format: false,
        }
    }
}

/// Initialize logging. Keep the returned guard alive until exit so buffered
/// file output is flushed.
pub fn init_logging(config: &LoggingConfig) -> SeatingResult<Option<WorkerGuard>> {
    if let Some(log_dir) = &config.log_dir {
        fs::create_dir_all(log_dir)
            .map_err(|e| SeatingError::file_io(log_dir.to_string_lossy().to_string(), e))?;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("banquet_seating={},{}", config.level, config.level)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .boxed();

    let registry = Registry::default().with(env_filter).with(console_layer);

    let guard = match &config.log_dir {
        Some(log_dir) => {
            let file_appender = rolling::daily(log_dir, "seatplan.log");
            let (file_writer, guard) = non_blocking(file_appender);

            let file_layer = if config.enable_json_format {
                fmt::layer().json().with_writer(file_writer).boxed()
            } else {
                fmt::layer().with_writer(file_writer).with_ansi(false).boxed()
            };

            registry
                .with(file_layer)
                .try_init()
                .map_err(|e| SeatingError::General(e.into()))?;
            Some(guard)
        }
        None => {
            registry
                .try_init()
                .map_err(|e| SeatingError::General(e.into()))?;
            None
        }
    };

    info!("Log level: {}", config.level);
    if let Some(log_dir) = &config.log_dir {
        info!("File logging enabled: {}", log_dir.display());
    }

    Ok(guard)
}

/// Logs how long a pipeline stage took when dropped
pub struct PerformanceTimer {
    start: std::time::Instant,
    operation: String,
}

impl PerformanceTimer {
    pub fn start(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        tracing::debug!("⏱️  Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    pub fn checkpoint(&self, checkpoint: &str) {
        let elapsed = self.start.elapsed();
        tracing::debug!("⏱️  {} - {}: {}ms", self.operation, checkpoint, elapsed.as_millis());
    }
}

impl Drop for PerformanceTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!("⏱️  Completed {}: {}ms", self.operation, elapsed.as_millis());
    }
}

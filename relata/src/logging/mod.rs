//! Structured logging setup for Relata.
//!
//! The scoring core only emits `tracing` events; hosts that do not install a
//! subscriber of their own can call [`init`] to get formatted output on
//! stdout or in a file. `RUST_LOG` takes precedence over the configured
//! level.


use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Error type for logging setup
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The log file or its directory could not be created
    #[error("Log file error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown level name
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// The subscriber could not be installed
    #[error("Subscriber error: {0}")]
    Subscriber(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Install a global `tracing` subscriber for `config`.
///
/// Stdout wins over a configured file. When logging to a file the returned
/// guard flushes buffered lines on drop and must be kept alive. If another
/// subscriber is already installed it is left in place.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (writer, guard) = if config.stdout {
        (BoxMakeWriter::new(std::io::stdout), None)
    } else if let Some(path) = &config.file {
        let (writer, guard) = create_non_blocking_file(path)?;
        (BoxMakeWriter::new(writer), Some(guard))
    } else {
        return Ok(None);
    };

    let level: Level = config.level.clone().into();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(writer);

    let installed = match config.format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::Compact => subscriber.compact().try_init(),
        LogFormat::Pretty => subscriber.pretty().try_init(),
        LogFormat::Default => subscriber.try_init(),
    };

    match installed {
        Ok(()) => {
            if config.stdout && config.file.is_some() {
                tracing::warn!("Logging to stdout; configured log file ignored");
            }
            Ok(guard)
        }
        Err(e) if is_already_installed(&e.to_string()) => Ok(None),
        Err(e) => Err(LogError::Subscriber(e.to_string())),
    }
}

fn is_already_installed(message: &str) -> bool {
    message.contains("already") || message.contains("SetGlobalDefaultError")
}

/// Non-blocking writer appending to `path`, creating parent directories
fn create_non_blocking_file(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)?;

    let file_name = path.file_name().ok_or_else(|| {
        LogError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("not a file path: {}", path.display()),
        ))
    })?;

    Ok(tracing_appender::non_blocking(
        tracing_appender::rolling::never(directory, file_name),
    ))
}

/// Parse a level name such as `"debug"` (case-insensitive)
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level.parse().map_err(|_| LogError::InvalidLevel(level.to_string()))
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        if level == Level::TRACE {
            LogLevel::Trace
        } else if level == Level::DEBUG {
            LogLevel::Debug
        } else if level == Level::INFO {
            LogLevel::Info
        } else if level == Level::WARN {
            LogLevel::Warn
        } else {
            LogLevel::Error
        }
    }
}

//! Logging errors

/// Errors returned by logger setup operations.
///
/// The leveled logging calls never fail; only configuration of the logger
/// itself can.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// A configuration value is out of range.
    #[error("invalid logging configuration: {0}")]
    InvalidConfiguration(String),

    /// The log directory or the current-file alias could not be created.
    #[error("failed to prepare log file: {0}")]
    Io(#[from] std::io::Error),

    /// The rolling file appender could not be built.
    #[error("failed to create rolling log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    /// A global tracing dispatcher is already installed.
    #[error("failed to initialize logging: {0}")]
    InitFailed(String),
}

//! Logger - leveled logging with context tags and an optional file sink
//!
//! A [`Logger`] owns its own `tracing` dispatcher built from two layers:
//!
//! - Console: [`CompositeFormatter`] lines, colored unless disabled
//! - File: the same lines without colors, written through a
//!   non-blocking worker once [`Logger::enable_file_sink`] has run
//!
//! Services normally construct one logger at startup and pass it around;
//! [`logger()`] provides a lazily built process-wide instance for code that
//! cannot.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};
use tracing_subscriber::{fmt as layers, layer::SubscriberExt};

use crate::config::LoggerConfig;
use crate::context::{composite_field, LogContext};
use crate::error::LoggingError;
use crate::file_sink::{open_rolling, retained_files, FileSlot};
use crate::format::{CompositeFormatter, Severity};

/// Target of every record emitted by a [`Logger`].
pub const LOG_TARGET: &str = "svckit";

/// Exit status used by [`Logger::fatal`].
pub const FATAL_EXIT_CODE: i32 = 1;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[cfg(test)]
static CONSTRUCTED: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

/// Process-wide logger, built from [`LoggerConfig::from_env`] on first use.
///
/// Concurrent first calls construct exactly one instance; every caller gets
/// the same reference.
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(|| {
        #[cfg(test)]
        CONSTRUCTED.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Logger::new(LoggerConfig::from_env())
    })
}

/// Record of the attached file sink.
struct AttachedSink {
    app_name: String,
    alias: PathBuf,
    guard: Option<WorkerGuard>,
}

/// Structured logger.
pub struct Logger {
    dispatch: Dispatch,
    config: LoggerConfig,
    file_slot: FileSlot,
    file_sink: Mutex<Option<AttachedSink>>,
}

/// Builder for [`Logger`].
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Option<BoxMakeWriter>,
}

impl LoggerBuilder {
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the console writer (stderr by default).
    pub fn console_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.console = Some(BoxMakeWriter::new(writer));
        self
    }

    pub fn build(self) -> Logger {
        let config = self.config;
        let console = self
            .console
            .unwrap_or_else(|| BoxMakeWriter::new(std::io::stderr));
        let file_slot = FileSlot::default();

        let console_layer = layers::layer()
            .event_format(CompositeFormatter)
            .with_writer(console)
            .with_ansi(config.ansi);

        let file_layer = layers::layer()
            .event_format(CompositeFormatter)
            .with_writer(file_slot.clone())
            .with_ansi(false);

        let subscriber = tracing_subscriber::registry()
            .with(config.env_filter())
            .with(console_layer)
            .with(file_layer);

        Logger {
            dispatch: Dispatch::new(subscriber),
            config,
            file_slot,
            file_sink: Mutex::new(None),
        }
    }
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            config: LoggerConfig::default(),
            console: None,
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn debug(&self, func: &str, ctx: Option<&LogContext>, args: fmt::Arguments<'_>) {
        self.emit(Severity::Debug, func, ctx, args);
    }

    pub fn info(&self, func: &str, ctx: Option<&LogContext>, args: fmt::Arguments<'_>) {
        self.emit(Severity::Info, func, ctx, args);
    }

    pub fn warn(&self, func: &str, ctx: Option<&LogContext>, args: fmt::Arguments<'_>) {
        self.emit(Severity::Warn, func, ctx, args);
    }

    pub fn error(&self, func: &str, ctx: Option<&LogContext>, args: fmt::Arguments<'_>) {
        self.emit(Severity::Error, func, ctx, args);
    }

    /// Log, flush every sink, then exit the process with [`FATAL_EXIT_CODE`].
    pub fn fatal(&self, func: &str, ctx: Option<&LogContext>, args: fmt::Arguments<'_>) -> ! {
        self.emit(Severity::Fatal, func, ctx, args);
        self.shutdown();
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Log, then panic with the formatted message as a `String` payload.
    pub fn panic(&self, func: &str, ctx: Option<&LogContext>, args: fmt::Arguments<'_>) -> ! {
        let message = args.to_string();
        self.emit(Severity::Panic, func, ctx, format_args!("{}", message));
        std::panic::panic_any(message)
    }

    /// Log at a severity chosen at runtime.
    ///
    /// `Fatal` and `Panic` keep their terminating behavior.
    pub fn log(
        &self,
        severity: Severity,
        func: &str,
        ctx: Option<&LogContext>,
        args: fmt::Arguments<'_>,
    ) {
        match severity {
            Severity::Fatal => self.fatal(func, ctx, args),
            Severity::Panic => self.panic(func, ctx, args),
            _ => self.emit(severity, func, ctx, args),
        }
    }

    fn emit(&self, severity: Severity, func: &str, ctx: Option<&LogContext>, args: fmt::Arguments<'_>) {
        let info = composite_field(func, ctx);
        let label = severity.as_str();

        tracing::dispatcher::with_default(&self.dispatch, || match severity {
            Severity::Debug => {
                tracing::debug!(target: LOG_TARGET, info = %info, severity = label, "{}", args)
            }
            Severity::Info => {
                tracing::info!(target: LOG_TARGET, info = %info, severity = label, "{}", args)
            }
            Severity::Warn => {
                tracing::warn!(target: LOG_TARGET, info = %info, severity = label, "{}", args)
            }
            Severity::Error | Severity::Fatal | Severity::Panic => {
                tracing::error!(target: LOG_TARGET, info = %info, severity = label, "{}", args)
            }
        });
    }

    /// Start mirroring records to `<logs_dir>/<filename>.log`.
    ///
    /// Files rotate daily; the current file and `max_age_days` rotated
    /// files are kept, so restarting never prunes today's file. Only
    /// the first successful call attaches a sink; later calls return `Ok`
    /// and change nothing. `app_name` is recorded but does not affect the
    /// path.
    pub fn enable_file_sink(
        &self,
        app_name: &str,
        filename: &str,
        max_age_days: i64,
    ) -> Result<(), LoggingError> {
        if max_age_days <= 0 {
            return Err(LoggingError::InvalidConfiguration(format!(
                "max_age_days must be > 0, got {}",
                max_age_days
            )));
        }

        let mut attached = self.file_sink.lock();
        if attached.is_some() {
            return Ok(());
        }

        let max_files = retained_files(max_age_days.unsigned_abs());
        let (appender, alias) = open_rolling(
            &self.config.logs_dir,
            &format!("{}.log", filename),
            max_files,
        )?;

        let (writer, guard) = tracing_appender::non_blocking(appender);
        self.file_slot.attach(writer);
        *attached = Some(AttachedSink {
            app_name: app_name.to_string(),
            alias: alias.clone(),
            guard: Some(guard),
        });
        drop(attached);

        self.debug(
            crate::function_name!(),
            None,
            format_args!(
                "file sink attached app={} path={} max_age_days={}",
                app_name,
                alias.display(),
                max_age_days
            ),
        );
        Ok(())
    }

    pub fn is_file_sink_enabled(&self) -> bool {
        self.file_slot.is_attached()
    }

    /// Alias path of the attached file sink.
    pub fn file_sink_path(&self) -> Option<PathBuf> {
        self.file_sink.lock().as_ref().map(|sink| sink.alias.clone())
    }

    /// App name given when the file sink was attached.
    pub fn file_sink_app(&self) -> Option<String> {
        self.file_sink.lock().as_ref().map(|sink| sink.app_name.clone())
    }

    /// Flush buffered file output and stop the file worker.
    ///
    /// Records logged to the file sink afterwards are dropped; the console
    /// keeps working.
    pub fn shutdown(&self) {
        if let Some(sink) = self.file_sink.lock().as_mut() {
            // Dropping the guard blocks until the worker has drained
            drop(sink.guard.take());
        }
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }

    /// Route plain `tracing` events from any crate through this logger.
    pub fn install_global_default(&self) -> Result<(), LoggingError> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|e| LoggingError::InitFailed(e.to_string()))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("file_sink", &self.file_sink_path())
            .finish()
    }
}

//! Logger configuration
//!
//! Defaults can be overridden from the environment; a `.env` file, when
//! present, fills in variables the process environment leaves unset:
//!
//! - `SVCKIT_LOG`: filter directive in `EnvFilter` syntax (default `info`)
//! - `SVCKIT_LOG_DIR`: directory for the file sink (default `./logs`)
//! - `NO_COLOR` or `SVCKIT_LOG_ANSI=false`: disable colored console output

use std::collections::HashMap;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_FILTER_ENV: &str = "SVCKIT_LOG";
/// Environment variable holding the log directory.
pub const LOG_DIR_ENV: &str = "SVCKIT_LOG_DIR";
/// Environment variable toggling colored output.
pub const LOG_ANSI_ENV: &str = "SVCKIT_LOG_ANSI";

/// Default filter directive.
pub const DEFAULT_FILTER: &str = "info";
/// Default directory for rotated log files, relative to the working directory.
pub const DEFAULT_LOGS_DIR: &str = "./logs";

/// Logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Filter directive, e.g. `info` or `debug,hyper=warn`
    pub filter: String,
    /// Colored console output
    pub ansi: bool,
    /// Directory the file sink writes into
    pub logs_dir: PathBuf,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            ansi: true,
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
        }
    }
}

impl LoggerConfig {
    /// Load settings from the environment on top of the defaults.
    ///
    /// Values in a `.env` file apply where the process environment has no
    /// value of its own. The file is read, never exported, so the process
    /// environment is left untouched.
    pub fn from_env() -> Self {
        let file_vars = dotenvy::dotenv_iter()
            .map(read_env_file)
            .unwrap_or_default();
        Self::from_lookup(layered(&file_vars))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }
        if let Some(dir) = lookup(LOG_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            config.logs_dir = PathBuf::from(dir);
        }
        if lookup("NO_COLOR").is_some() {
            config.ansi = false;
        }
        if let Some(ansi) = lookup(LOG_ANSI_ENV) {
            config.ansi = !matches!(ansi.to_lowercase().as_str(), "0" | "false" | "no" | "off");
        }

        config
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn with_logs_dir(mut self, logs_dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = logs_dir.into();
        self
    }

    /// Build the filter, falling back to the default on a bad directive.
    pub(crate) fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|e| {
            eprintln!(
                "Warning: invalid log filter '{}' ({}), using '{}'",
                self.filter, e, DEFAULT_FILTER
            );
            EnvFilter::new(DEFAULT_FILTER)
        })
    }
}

/// Collect the parseable entries of a `.env` file.
fn read_env_file<I>(entries: I) -> HashMap<String, String>
where
    I: Iterator<Item = dotenvy::Result<(String, String)>>,
{
    entries.filter_map(Result::ok).collect()
}

/// Process environment first, then `.env` file values.
fn layered(file_vars: &HashMap<String, String>) -> impl Fn(&str) -> Option<String> + '_ {
    move |key: &str| std::env::var(key).ok().or_else(|| file_vars.get(key).cloned())
}

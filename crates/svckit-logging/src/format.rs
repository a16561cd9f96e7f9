//! Line formatter
//!
//! Renders one record per line:
//!
//! ```text
//! 1018 142503.117 [INFO] [|FN:handle_login|IP:10.0.0.1] user signed in
//! ```
//!
//! Field keys are hidden and only the composite `info` field is rendered;
//! any other fields on the event are ignored.

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::context::INFO_FIELD;

/// `MMDD HHMMSS.mmm`
pub const TIMESTAMP_FORMAT: &str = "%m%d %H%M%S%.3f";

/// Name of the field carrying the [`Severity`] label.
pub(crate) const SEVERITY_FIELD: &str = "severity";

const RESET: &str = "\x1b[0m";
const GRAY: &str = "\x1b[37m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Log severity.
///
/// `tracing` has no fatal or panic level, so both are emitted at `ERROR`
/// and keep their own label through the `severity` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Panic => "PANIC",
        }
    }

    fn color(label: &str) -> &'static str {
        match label {
            "DEBUG" | "TRACE" => GRAY,
            "WARN" => YELLOW,
            "ERROR" | "FATAL" | "PANIC" => RED,
            _ => CYAN,
        }
    }
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warn => Level::WARN,
            Severity::Error | Severity::Fatal | Severity::Panic => Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event formatter used by both the console and the file layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeFormatter;

impl<S, N> FormatEvent<S, N> for CompositeFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut fields = RecordFields::default();
        event.record(&mut fields);

        let label = fields
            .severity
            .as_deref()
            .unwrap_or_else(|| event.metadata().level().as_str());

        write!(
            writer,
            "{} ",
            chrono::Local::now().format(TIMESTAMP_FORMAT)
        )?;

        if writer.has_ansi_escapes() {
            write!(writer, "{}[{}]{} ", Severity::color(label), label, RESET)?;
        } else {
            write!(writer, "[{}] ", label)?;
        }

        if let Some(info) = &fields.info {
            write!(writer, "[{}] ", info)?;
        }

        writeln!(writer, "{}", fields.message)
    }
}

/// Collects the fields the formatter renders.
#[derive(Default)]
struct RecordFields {
    message: String,
    info: Option<String>,
    severity: Option<String>,
}

impl Visit for RecordFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            INFO_FIELD => self.info = Some(value.to_string()),
            SEVERITY_FIELD => self.severity = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            INFO_FIELD => self.info = Some(format!("{:?}", value)),
            SEVERITY_FIELD => self.severity = Some(format!("{:?}", value)),
            _ => {}
        }
    }
}

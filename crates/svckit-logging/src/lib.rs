//! # svckit Logging
//!
//! Structured logger for backend services. Every record carries one
//! composite `info` field with the calling function and the request's
//! tags:
//!
//! ```text
//! 1018 142503.117 [INFO] [|FN:handle_login|IP:10.0.0.1|SS:k2a9|TY:MOB] user signed in
//! ```
//!
//! ## Modules
//!
//! - `context` - Per-request tags and the composite field
//! - `callsite` - Compile-time capture of the calling function's name
//! - `format` - Line formatter and severities
//! - `file_sink` - Daily rotating file with a stable alias
//! - `config` - Logger settings and environment overrides
//! - `logger` - The logger, its builder and the process-wide instance
//!
//! # Usage
//!
//! ```rust,ignore
//! use svckit_logging::{log_info, LogContext, Logger, LoggerConfig};
//!
//! let logger = Logger::new(LoggerConfig::from_env());
//! logger.enable_file_sink("billing", "billing-api", 7)?;
//!
//! let ctx = LogContext::new()
//!     .with_client_ip(addr)
//!     .with_session_id(session)
//!     .with_request_type(svckit_logging::request_type::MOBILE);
//! log_info!(logger: &logger, ctx: &ctx, "invoice {} paid", invoice_id);
//! ```

pub mod callsite;
pub mod config;
pub mod context;
mod error;
mod file_sink;
pub mod format;
mod logger;
mod macros;

pub use config::LoggerConfig;
pub use context::{composite_field, request_type, LogContext, INFO_FIELD};
pub use error::LoggingError;
pub use format::{CompositeFormatter, Severity, TIMESTAMP_FORMAT};
pub use logger::{logger, Logger, LoggerBuilder, FATAL_EXIT_CODE, LOG_TARGET};

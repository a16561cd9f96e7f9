//! Log Context - per-request tags attached to every log record
//!
//! A [`LogContext`] carries the client IP, session ID, user ID and request
//! type of the request being served. The logger folds the context into a
//! single composite `info` field so that every line for a request can be
//! grepped by any of its tags.

use std::fmt::Write;

/// Name of the composite field rendered by the formatter.
pub const INFO_FIELD: &str = "info";

/// Well-known request type codes.
pub mod request_type {
    /// Mobile client
    pub const MOBILE: &str = "MOB";
    /// Back office
    pub const BACK_OFFICE: &str = "BOF";
    /// Message queue consumer
    pub const MESSAGE_QUEUE: &str = "MSQ";
    /// Internal system call
    pub const SYSTEM: &str = "SYS";
    /// Scheduled job
    pub const SCHEDULER: &str = "SCH";
}

/// Per-request tags for a log record.
///
/// Every field is optional; absent fields are left out of the composite
/// field entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogContext {
    /// Address of the client that issued the request
    pub client_ip: Option<String>,
    /// Session identifier, usually generated by the first caller
    pub session_id: Option<String>,
    /// Authenticated user
    pub user_id: Option<String>,
    /// Short request type code (see [`request_type`])
    pub request_type: Option<String>,
}

impl LogContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_request_type(mut self, request_type: impl Into<String>) -> Self {
        self.request_type = Some(request_type.into());
        self
    }

    /// True when no tag is set
    pub fn is_empty(&self) -> bool {
        self.client_ip.is_none()
            && self.session_id.is_none()
            && self.user_id.is_none()
            && self.request_type.is_none()
    }
}

/// Build the composite `info` value for one record.
///
/// Segments are appended in a fixed order: `|FN:`, `|IP:`, `|SS:`, `|US:`,
/// `|TY:`. Only `|FN:` is always present.
pub fn composite_field(func: &str, ctx: Option<&LogContext>) -> String {
    let mut out = String::with_capacity(64);
    out.push_str("|FN:");
    out.push_str(func);

    let Some(ctx) = ctx else {
        return out;
    };

    let segments = [
        ("IP", &ctx.client_ip),
        ("SS", &ctx.session_id),
        ("US", &ctx.user_id),
        ("TY", &ctx.request_type),
    ];
    for (tag, value) in segments {
        if let Some(value) = value {
            // Writing into a String cannot fail
            let _ = write!(out, "|{}:{}", tag, value);
        }
    }

    out
}

//! Logging macros
//!
//! Each macro captures the calling function's name and accepts an optional
//! explicit logger and context ahead of the format string:
//!
//! ```ignore
//! log_info!("cache warmed in {}ms", elapsed);
//! log_info!(ctx: &ctx, "user {} signed in", user);
//! log_info!(logger: &logger, "started");
//! log_info!(logger: &logger, ctx: &ctx, "request done");
//! ```
//!
//! Without `logger:` the process-wide [`logger()`](crate::logger) is used.

#[doc(hidden)]
#[macro_export]
macro_rules! __svckit_log {
    ($method:ident, $logger:expr, $ctx:expr, $($arg:tt)+) => {
        $logger.$method(
            $crate::function_name!(),
            $ctx,
            ::core::format_args!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    (logger: $logger:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(debug, $logger, ::core::option::Option::Some($ctx), $($arg)+)
    };
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(debug, $logger, ::core::option::Option::None, $($arg)+)
    };
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(debug, $crate::logger(), ::core::option::Option::Some($ctx), $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__svckit_log!(debug, $crate::logger(), ::core::option::Option::None, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    (logger: $logger:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(info, $logger, ::core::option::Option::Some($ctx), $($arg)+)
    };
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(info, $logger, ::core::option::Option::None, $($arg)+)
    };
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(info, $crate::logger(), ::core::option::Option::Some($ctx), $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__svckit_log!(info, $crate::logger(), ::core::option::Option::None, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    (logger: $logger:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(warn, $logger, ::core::option::Option::Some($ctx), $($arg)+)
    };
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(warn, $logger, ::core::option::Option::None, $($arg)+)
    };
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(warn, $crate::logger(), ::core::option::Option::Some($ctx), $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__svckit_log!(warn, $crate::logger(), ::core::option::Option::None, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    (logger: $logger:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(error, $logger, ::core::option::Option::Some($ctx), $($arg)+)
    };
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(error, $logger, ::core::option::Option::None, $($arg)+)
    };
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(error, $crate::logger(), ::core::option::Option::Some($ctx), $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__svckit_log!(error, $crate::logger(), ::core::option::Option::None, $($arg)+)
    };
}

/// Logs, flushes and exits the process.
#[macro_export]
macro_rules! log_fatal {
    (logger: $logger:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(fatal, $logger, ::core::option::Option::Some($ctx), $($arg)+)
    };
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(fatal, $logger, ::core::option::Option::None, $($arg)+)
    };
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(fatal, $crate::logger(), ::core::option::Option::Some($ctx), $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__svckit_log!(fatal, $crate::logger(), ::core::option::Option::None, $($arg)+)
    };
}

/// Logs, then panics with the formatted message.
#[macro_export]
macro_rules! log_panic {
    (logger: $logger:expr, ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(panic, $logger, ::core::option::Option::Some($ctx), $($arg)+)
    };
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(panic, $logger, ::core::option::Option::None, $($arg)+)
    };
    (ctx: $ctx:expr, $($arg:tt)+) => {
        $crate::__svckit_log!(panic, $crate::logger(), ::core::option::Option::Some($ctx), $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__svckit_log!(panic, $crate::logger(), ::core::option::Option::None, $($arg)+)
    };
}

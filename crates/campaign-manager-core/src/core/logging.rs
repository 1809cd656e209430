//! Logging macros
//!
//! Thin wrappers over `tracing` that emit every event under the
//! `campaign_manager` target. Both crates in the workspace log through these.

/// Target attached to every event emitted through the macros below
pub const LOG_TARGET: &str = "campaign_manager";

/// Info level logging - general information messages
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::__tracing::info!(target: $crate::core::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Warning level logging - potentially problematic situations
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::__tracing::warn!(target: $crate::core::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Error level logging - error conditions
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        $crate::__tracing::error!(target: $crate::core::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Debug level logging - detailed information for debugging
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        $crate::__tracing::debug!(target: $crate::core::logging::LOG_TARGET, $($arg)*);
    }};
}

/// Trace level logging - very detailed tracing information
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        $crate::__tracing::trace!(target: $crate::core::logging::LOG_TARGET, $($arg)*);
    }};
}

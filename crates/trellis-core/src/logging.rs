//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Log lines are scoped to per-subsystem targets so they can be filtered with
//! `tracing` directives, for example `trellis_core::signal=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "trellis_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Object model target.
    pub const OBJECT: &str = "trellis_core::object";
    /// Property system target.
    pub const PROPERTY: &str = "trellis_core::property";
    /// Widget layer target.
    pub const WIDGET: &str = "trellis::widget";
}

/// Trace-level log with the core target.
#[macro_export]
macro_rules! trellis_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "trellis_core", $($arg)*)
    };
}

/// Debug-level log with the core target.
#[macro_export]
macro_rules! trellis_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "trellis_core", $($arg)*)
    };
}

/// Info-level log with the core target.
#[macro_export]
macro_rules! trellis_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "trellis_core", $($arg)*)
    };
}

/// Warn-level log with the core target.
#[macro_export]
macro_rules! trellis_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "trellis_core", $($arg)*)
    };
}

/// Error-level log with the core target.
#[macro_export]
macro_rules! trellis_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "trellis_core", $($arg)*)
    };
}

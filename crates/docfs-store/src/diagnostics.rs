//! Pluggable diagnostic output.
//!
//! The store never needs a sink for correctness; it only reports what it is
//! doing. [`TracingSink`] is used unless the caller injects another
//! [`DiagnosticSink`], so installing a `tracing` subscriber is enough to see
//! store activity on the console.

use std::fmt;

/// Severity of a diagnostic message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        };
        f.write_str(s)
    }
}

/// Receiver for leveled diagnostic messages.
///
/// Implementations must be thread-safe; the store calls the sink from
/// whichever thread performs the operation. Reporting a [`Level::Fatal`]
/// message must not terminate the process.
pub trait DiagnosticSink: Send + Sync {
    /// Record one message.
    fn log(&self, level: Level, message: &str);

    fn fatal(&self, message: &str) {
        self.log(Level::Fatal, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }
}

/// Forwards messages to the `tracing` macros under the `docfs` target.
///
/// `tracing` has no fatal level; fatal messages are emitted as errors with a
/// `fatal = true` field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Fatal => tracing::error!(target: "docfs", fatal = true, "{message}"),
            Level::Error => tracing::error!(target: "docfs", "{message}"),
            Level::Warn => tracing::warn!(target: "docfs", "{message}"),
            Level::Info => tracing::info!(target: "docfs", "{message}"),
            Level::Debug => tracing::debug!(target: "docfs", "{message}"),
            Level::Trace => tracing::trace!(target: "docfs", "{message}"),
        }
    }
}

/// Discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn log(&self, _level: Level, _message: &str) {}
}

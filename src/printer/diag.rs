// src/printer/diag.rs

//! Diagnostic messages for users.
//!
//! There is no global logger. A [`DiagnosticSink`] is created once at process
//! start, with an explicit [`DiagLevel`], and passed to everything that
//! reports diagnostics.
//!
//! Function tracing for developers is done separately with `si_trace_print`
//! macros which only print in debug builds.
//!
//! [`DiagnosticSink`]: crate::printer::diag::DiagnosticSink
//! [`DiagLevel`]: crate::printer::diag::DiagLevel

use std::fmt;
use std::io::Write;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Severity of a diagnostic message.
///
/// Ordered from most severe to least severe; a sink at level `Info` emits
/// `Error` and `Info` messages.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DiagLevel {
    Error,
    Info,
    Debug,
}

impl DiagLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DiagLevel::Error => "ERROR",
            DiagLevel::Info => "INFO",
            DiagLevel::Debug => "DEBUG",
        }
    }

    /// Color of the message prefix.
    pub const fn color(&self) -> Color {
        match self {
            DiagLevel::Error => Color::Red,
            DiagLevel::Info => Color::Green,
            DiagLevel::Debug => Color::Cyan,
        }
    }
}

impl fmt::Display for DiagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receiver of diagnostic messages.
pub trait DiagnosticSink {
    /// Least severe level this sink emits.
    fn level(&self) -> DiagLevel;

    /// Emit `message` at `level`. Implementations drop messages less severe
    /// than [`level`](DiagnosticSink::level).
    fn log(
        &self,
        level: DiagLevel,
        message: &str,
    );

    /// Would a message at `level` be emitted?
    fn enabled(
        &self,
        level: DiagLevel,
    ) -> bool {
        level <= self.level()
    }

    fn error(
        &self,
        message: &str,
    ) {
        self.log(DiagLevel::Error, message)
    }

    fn info(
        &self,
        message: &str,
    ) {
        self.log(DiagLevel::Info, message)
    }

    fn debug(
        &self,
        message: &str,
    ) {
        self.log(DiagLevel::Debug, message)
    }
}

/// Write diagnostics to stderr as `LEVEL: message`, the `LEVEL` colored if
/// `color_choice` allows.
#[derive(Clone, Copy, Debug)]
pub struct StderrSink {
    level: DiagLevel,
    color_choice: ColorChoice,
}

impl StderrSink {
    pub const fn new(
        level: DiagLevel,
        color_choice: ColorChoice,
    ) -> StderrSink {
        StderrSink { level, color_choice }
    }

    fn write_message(
        &self,
        level: DiagLevel,
        message: &str,
    ) -> std::io::Result<()> {
        let stderr = StandardStream::stderr(self.color_choice);
        let mut stderr_lock = stderr.lock();
        stderr_lock.set_color(ColorSpec::new().set_fg(Some(level.color())))?;
        write!(stderr_lock, "{}", level)?;
        stderr_lock.reset()?;
        writeln!(stderr_lock, ": {}", message)?;
        stderr_lock.flush()
    }
}

impl DiagnosticSink for StderrSink {
    fn level(&self) -> DiagLevel {
        self.level
    }

    fn log(
        &self,
        level: DiagLevel,
        message: &str,
    ) {
        if !self.enabled(level) {
            return;
        }
        // nowhere left to report a failure to write to stderr
        if let Err(_err) = self.write_message(level, message) {
            defñ!("write_message failed {}", _err);
        }
    }
}

/// Discard all diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn level(&self) -> DiagLevel {
        DiagLevel::Error
    }

    fn log(
        &self,
        _level: DiagLevel,
        _message: &str,
    ) {}
}

//! Console output pipeline.
//!
//! Every user-visible line goes through a [`Console`]: informational output,
//! summaries, executor errors, internal faults and stack traces. The
//! [`ConsoleConfig`] is derived once from the parsed global options and
//! handed to the console explicitly; nothing here is global state.
//!
//! Writes are best-effort. A closed pipe or full disk never turns a
//! successful command into a failure.

mod formatter;

use std::io::Write;

pub use formatter::{MessageKind, OutputFormatter};

use crate::cli::call::ParsedCall;
use crate::cli::catalog::{
    OPTION_LOGGER, OPTION_LOGGER_NAME, OPTION_NO_COLOR, OPTION_NO_SUMMARY, OPTION_SILENT,
};
use crate::types::{ColorMode, OutputDestination};

/// Logger name used with `--logger` when `--logger-name` is not given.
pub const DEFAULT_LOGGER_NAME: &str = "m7r_cm";

/// Console settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsoleConfig {
    pub color: ColorMode,
    pub silent: bool,
    pub summary: bool,
    /// Present when output is redirected to the logger.
    pub logger_name: Option<String>,
}

impl ConsoleConfig {
    pub fn from_call(call: &ParsedCall) -> Self {
        let globals = call.global_options();
        let color = if globals.has_option(OPTION_NO_COLOR) {
            ColorMode::Never
        } else {
            ColorMode::Auto
        };
        let logger_name = globals.has_option(OPTION_LOGGER).then(|| {
            globals
                .value(OPTION_LOGGER_NAME)
                .unwrap_or(DEFAULT_LOGGER_NAME)
                .to_string()
        });
        Self {
            color,
            silent: globals.has_option(OPTION_SILENT),
            summary: !globals.has_option(OPTION_NO_SUMMARY),
            logger_name,
        }
    }

    /// Settings used before a call was parsed (syntax errors).
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            summary: true,
            ..Self::default()
        }
    }

    fn formatter(&self) -> OutputFormatter {
        if self.silent {
            OutputFormatter::Silent
        } else if let Some(name) = &self.logger_name {
            OutputFormatter::Logger { name: name.clone() }
        } else {
            OutputFormatter::stream(self.color)
        }
    }
}

/// Destination-aware writer for all user-visible text.
pub struct Console {
    formatter: OutputFormatter,
    summary: bool,
    standard: Box<dyn Write>,
    error: Box<dyn Write>,
}

impl Console {
    pub fn new(config: &ConsoleConfig, standard: Box<dyn Write>, error: Box<dyn Write>) -> Self {
        Self {
            formatter: config.formatter(),
            summary: config.summary,
            standard,
            error,
        }
    }

    pub fn out(&mut self, message: &str) {
        self.emit(MessageKind::Info, message);
    }

    pub fn error_out(&mut self, message: &str) {
        self.emit(MessageKind::Error, message);
    }

    pub fn internal_error_out(&mut self, message: &str) {
        self.emit(MessageKind::InternalError, message);
    }

    /// Success summary; dropped with `--no-summary`.
    pub fn summary(&mut self, message: &str) {
        if self.summary {
            self.emit(MessageKind::Summary, message);
        }
    }

    /// Raw stack trace text, one write per line.
    pub fn trace(&mut self, text: &str) {
        for line in text.lines() {
            self.emit(MessageKind::Trace, line);
        }
    }

    pub fn flush(&mut self) {
        let _ = self.standard.flush();
        let _ = self.error.flush();
    }

    fn emit(&mut self, kind: MessageKind, message: &str) {
        if self.formatter.log(kind, message) {
            return;
        }
        let Some(styled) = self.formatter.format(kind, message) else {
            return;
        };
        let stream = match kind.destination() {
            OutputDestination::Standard => &mut self.standard,
            OutputDestination::Error => &mut self.error,
        };
        let _ = writeln!(stream, "{styled}");
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        self.flush();
    }
}

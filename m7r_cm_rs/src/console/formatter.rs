//! Output formatting strategies.
//!
//! The strategy is picked once from the [`ConsoleConfig`](super::ConsoleConfig)
//! and never changes during a run.

use crate::colors::Painter;
use crate::types::{ColorMode, OutputDestination};

/// What kind of message is being written.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageKind {
    Info,
    Summary,
    Error,
    InternalError,
    Trace,
}

impl MessageKind {
    pub fn destination(self) -> OutputDestination {
        match self {
            MessageKind::Info | MessageKind::Summary => OutputDestination::Standard,
            MessageKind::Error | MessageKind::InternalError | MessageKind::Trace => {
                OutputDestination::Error
            }
        }
    }
}

#[derive(Clone, Debug)]
pub enum OutputFormatter {
    /// Drop everything.
    Silent,
    /// Route messages to the tracing sink, tagged with the logger name.
    Logger { name: String },
    /// Write to the streams, one painter per stream. Painters are disabled in
    /// plain mode.
    Stream { standard: Painter, error: Painter },
}

impl OutputFormatter {
    pub fn stream(mode: ColorMode) -> Self {
        OutputFormatter::Stream {
            standard: Painter::new(mode, OutputDestination::Standard),
            error: Painter::new(mode, OutputDestination::Error),
        }
    }

    /// Styled text for stream output, `None` when nothing must be written.
    pub fn format(&self, kind: MessageKind, message: &str) -> Option<String> {
        let painter = match (self, kind.destination()) {
            (OutputFormatter::Silent | OutputFormatter::Logger { .. }, _) => return None,
            (OutputFormatter::Stream { standard, .. }, OutputDestination::Standard) => standard,
            (OutputFormatter::Stream { error, .. }, OutputDestination::Error) => error,
        };
        let styled = match kind {
            MessageKind::Info => message.to_string(),
            MessageKind::Summary => painter.ok(message),
            MessageKind::Error => painter.error(message),
            MessageKind::InternalError => painter.internal(&internal_text(message)),
            MessageKind::Trace => painter.dim(message),
        };
        Some(styled)
    }

    /// Emit a tracing event when in logger mode. Returns true if handled.
    pub fn log(&self, kind: MessageKind, message: &str) -> bool {
        let OutputFormatter::Logger { name } = self else {
            return false;
        };
        match kind {
            MessageKind::Info | MessageKind::Summary => {
                tracing::info!(logger = %name, "{message}");
            }
            MessageKind::Error => tracing::error!(logger = %name, "{message}"),
            MessageKind::InternalError => {
                tracing::error!(logger = %name, internal = true, "{}", internal_text(message));
            }
            MessageKind::Trace => tracing::error!(logger = %name, trace = true, "{message}"),
        }
        true
    }
}

fn internal_text(message: &str) -> String {
    if message.is_empty() {
        "Internal error.".to_string()
    } else {
        format!("Internal error: {message}")
    }
}

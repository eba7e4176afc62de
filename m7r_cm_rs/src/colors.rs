//! Terminal color utilities for console output.
//!
//! ANSI color codes plus a [`Painter`] that the console uses to style
//! messages per destination. Disabled painters return text untouched.

use std::io::IsTerminal;

use crate::types::{ColorMode, OutputDestination};

// ============================================================================
// ANSI Color Codes
// ============================================================================

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

pub const BRIGHT_RED: &str = "\x1b[91m";

// ============================================================================
// Color State
// ============================================================================

/// Determines if colors should be used based on ColorMode and whether the
/// stream behind `destination` is a terminal.
pub fn is_enabled(mode: ColorMode, destination: OutputDestination) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => match destination {
            OutputDestination::Standard => std::io::stdout().is_terminal(),
            OutputDestination::Error => std::io::stderr().is_terminal(),
        },
    }
}

/// Colorizer handed to the output formatter.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode, destination: OutputDestination) -> Self {
        Self {
            enabled: is_enabled(mode, destination),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Executor and consistency errors - RED
    pub fn error(&self, s: &str) -> String {
        self.wrap(s, RED)
    }

    /// Internal faults - BOLD BRIGHT_RED
    pub fn internal(&self, s: &str) -> String {
        self.wrap_both(s, BOLD, BRIGHT_RED)
    }

    /// Success summaries - GREEN
    pub fn ok(&self, s: &str) -> String {
        self.wrap(s, GREEN)
    }

    /// Stack traces, hints - DIM
    pub fn dim(&self, s: &str) -> String {
        self.wrap(s, DIM)
    }

    pub fn wrap(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn wrap_both(&self, s: &str, code1: &str, code2: &str) -> String {
        if self.enabled {
            format!("{code1}{code2}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_painter_disabled() {
        let p = Painter { enabled: false };
        assert_eq!(p.error("test"), "test");
        assert_eq!(p.ok("test"), "test");
        assert_eq!(p.internal("test"), "test");
    }

    #[test]
    fn test_painter_enabled() {
        let p = Painter { enabled: true };
        assert_eq!(p.error("test"), "\x1b[31mtest\x1b[0m");
        assert_eq!(p.ok("test"), "\x1b[32mtest\x1b[0m");
        assert_eq!(p.dim("test"), "\x1b[2mtest\x1b[0m");
        assert_eq!(p.internal("test"), "\x1b[1m\x1b[91mtest\x1b[0m");
    }

    #[test]
    fn test_color_mode_detection() {
        for destination in [OutputDestination::Standard, OutputDestination::Error] {
            assert!(is_enabled(ColorMode::Always, destination));
            assert!(!is_enabled(ColorMode::Never, destination));
        }
        // Auto depends on terminal, can't reliably test
    }
}

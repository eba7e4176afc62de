//! # m7r-cm
//!
//! **mentalizr content manager CLI** - builds, cleans, checks and inspects a
//! content repository of mdp programs and their media resources.
//!
//! The crate is mostly the command-line orchestration around that work:
//! a declarative command catalog, an argument parser with pointer
//! diagnostics, the execution context, the dispatcher and a console pipeline
//! that turns every outcome into output and an exit code.
//!
//! ## CLI Usage
//!
//! ```bash
//! m7r-cm -p ./content build             # build all programs
//! m7r-cm -p ./content media ls -o p01   # orphaned media of p01
//! m7r-cm -p ./content media prune       # move orphaned media aside
//! m7r-cm check p01_m01_intro            # compile one unit, write nothing
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Command catalog, parser, dispatcher and top-level error handler.
pub mod cli;

/// Destination-aware console output (plain, colorized, silent, logger).
pub mod console;

/// Execution context derived from a parsed call.
pub mod context;

/// Error taxonomy: consistency errors and executor errors.
pub mod error;

/// One executor per command path.
pub mod executors;

// ============================================================================
// Content Repository
// ============================================================================

/// Minimal content repository model: programs, units, media, build output.
pub mod content;

/// Optional `.m7r-cm/config.toml` in the content root.
pub mod config;

// ============================================================================
// Utilities
// ============================================================================

/// ANSI colors for console output.
pub mod colors;

/// Shared small enums.
pub mod types;

pub use cli::{Cli, ParsedCall, create_cli};
pub use console::{Console, ConsoleConfig};
pub use context::ExecutionContext;
pub use error::{ConsistencyError, ExecutorError};
pub use executors::{CommandExecutor, ExecutorOutput};

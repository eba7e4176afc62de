//! CLI orchestration for `m7r-cm`.
//!
//! # Architecture
//!
//! ```text
//! argv ──▶ Parser ──▶ ParsedCall ──▶ Console (from global options)
//!            │                            │
//!            ▼                            ▼
//!      syntax error               Dispatcher ──▶ ExecutionContext ──▶ Executor
//!     (3 lines, exit 1)               │                                  │
//!                                     └──── help / version text          ▼
//!                                                          ExecutorOutput | ExecutorError
//! ```
//!
//! # Module Structure
//!
//! - [`command`] - option, parameter and command definitions plus the registry trie
//! - [`definition`] - the assembled [`Cli`] and its builder
//! - `parser` - raw tokens to [`ParsedCall`]
//! - [`catalog`] - the concrete m7r-cm commands and options
//! - [`help`] - help and version text
//! - [`dispatch`] - executor resolution and invocation
//! - [`entrypoint`] - top-level error handler and exit codes

pub mod call;
pub mod catalog;
pub mod command;
pub mod definition;
pub mod dispatch;
pub mod entrypoint;
pub mod error;
pub mod help;
mod parser;

// Re-export main types for convenience
pub use call::{OptionValues, ParsedCall};
pub use catalog::create_cli;
pub use definition::{Cli, CliBuilder, CliDescription};
pub use error::{CliDefinitionError, UnrecognizedArgumentError};

// Re-export dispatch functions
pub use dispatch::{DispatchResult, dispatch};

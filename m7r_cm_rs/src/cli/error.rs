//! Errors of the CLI layer itself: catalog definition errors (programming
//! errors, caught when the catalog is built) and call syntax errors.

use thiserror::Error;

/// Raised while building the option/command catalog.
#[derive(Debug, Error)]
pub enum CliDefinitionError {
    #[error("Duplicate option '{id}' (collides with '{existing}'): {reason}.")]
    DuplicateOption {
        id: String,
        existing: String,
        reason: String,
    },

    #[error("Ambiguous command '{path}': conflicts with registered command '{existing}'.")]
    AmbiguousCommand { path: String, existing: String },

    #[error("Option '{id}' needs a short or a long name.")]
    UnnamedOption { id: String },

    #[error("Invalid command path '{path}'.")]
    InvalidCommandPath { path: String },

    #[error("Command '{path}' has no executor bound.")]
    MissingExecutor { path: String },
}

/// A call that does not match the catalog.
///
/// Besides the message it carries the reconstructed call string and a pointer
/// string whose `^` sits under the offending token, so the handler can print
/// a positional diagnostic verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UnrecognizedArgumentError {
    executable_name: String,
    message: String,
    call_string: String,
    call_pointer_string: String,
}

impl UnrecognizedArgumentError {
    /// Build the error for `args`, pointing at token `index`.
    ///
    /// An `index` equal to `args.len()` points just past the end of the call.
    pub fn at_token(
        executable_name: &str,
        args: &[String],
        index: usize,
        message: impl Into<String>,
    ) -> Self {
        let call_string = call_string(executable_name, args);
        let column = token_offset(executable_name, args, index);
        Self {
            executable_name: executable_name.to_string(),
            message: message.into(),
            call_string,
            call_pointer_string: format!("{}^", " ".repeat(column)),
        }
    }

    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn call_string(&self) -> &str {
        &self.call_string
    }

    pub fn call_pointer_string(&self) -> &str {
        &self.call_pointer_string
    }

    /// Column of the `^` marker.
    pub fn column(&self) -> usize {
        self.call_pointer_string.len() - 1
    }
}

/// `<executable> <arg> <arg> ...` with single-space separators.
pub fn call_string(executable_name: &str, args: &[String]) -> String {
    std::iter::once(executable_name)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Character column at which token `index` starts inside [`call_string`].
fn token_offset(executable_name: &str, args: &[String], index: usize) -> usize {
    let mut offset = executable_name.chars().count() + 1;
    for arg in args.iter().take(index) {
        offset += arg.chars().count() + 1;
    }
    if index >= args.len() {
        // Past the end: right after the last character.
        offset - 1
    } else {
        offset
    }
}

//! Error taxonomy shared by the context builder, the executors and the
//! top-level handler.
//!
//! - [`ConsistencyError`] - user-correctable repository/environment problems
//!   (missing content root, unknown program, broken config file).
//! - [`ExecutorError`] - failure returned by a command executor. Its optional
//!   [`ExecutorCause`] is inspected only to detect the consistency case.
//!
//! Internal faults are not modelled here: they are panics, caught and reported
//! by [`crate::cli::entrypoint`].

use std::backtrace::Backtrace;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::content::BuildError;

/// A path given by the user that does not satisfy the expected shape.
#[derive(Debug, Error)]
pub enum PathConsistencyError {
    #[error("Path not found: {}", .0.display())]
    NotExisting(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot resolve path {}: {source}", path.display())]
    Unresolvable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PathConsistencyError {
    /// Assert `path` exists and is a directory.
    pub fn assert_is_existing_directory(path: &std::path::Path) -> Result<(), Self> {
        if !path.exists() {
            return Err(Self::NotExisting(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(Self::NotADirectory(path.to_path_buf()));
        }
        Ok(())
    }
}

/// Domain inconsistency, reported to the user with its plain message.
#[derive(Debug, Error)]
pub enum ConsistencyError {
    #[error(transparent)]
    Path(#[from] PathConsistencyError),

    #[error("Program [{program}] not found in content root {}.", root.display())]
    UnknownProgram { program: String, root: PathBuf },

    #[error("Invalid configuration file {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },
}

/// Classified cause of an [`ExecutorError`].
#[derive(Debug, Error)]
pub enum ExecutorCause {
    #[error(transparent)]
    Inconsistency(#[from] ConsistencyError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure raised by a command executor.
///
/// Carries an operation-scoped message, an optional cause and the backtrace
/// captured where the error was created (printed with `--stacktrace`).
pub struct ExecutorError {
    message: String,
    cause: Option<ExecutorCause>,
    backtrace: Backtrace,
}

impl ExecutorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
            backtrace: Backtrace::force_capture(),
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: impl Into<ExecutorCause>) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
            backtrace: Backtrace::force_capture(),
        }
    }

    /// Wrap a consistency error; the message is the inconsistency's own message.
    pub fn inconsistency(error: ConsistencyError) -> Self {
        Self::with_cause(error.to_string(), error)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&ExecutorCause> {
        self.cause.as_ref()
    }

    /// True when the cause is a [`ConsistencyError`].
    pub fn is_inconsistency(&self) -> bool {
        matches!(self.cause, Some(ExecutorCause::Inconsistency(_)))
    }

    /// Error chain plus backtrace, as written for `--stacktrace`.
    pub fn render_trace(&self) -> String {
        let mut trace = format!("ExecutorError: {}\n", self.message);
        let mut source = std::error::Error::source(self);
        let mut depth = 0;
        while let Some(err) = source {
            if depth == 0 {
                trace.push_str("Caused by:\n");
            }
            trace.push_str(&format!("    {depth}: {err}\n"));
            source = err.source();
            depth += 1;
        }
        trace.push_str("Stack backtrace:\n");
        trace.push_str(&self.backtrace.to_string());
        trace
    }
}

impl fmt::Debug for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutorError")
            .field("message", &self.message)
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl From<ConsistencyError> for ExecutorError {
    fn from(error: ConsistencyError) -> Self {
        Self::inconsistency(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inconsistency_keeps_plain_message() {
        let err = ExecutorError::inconsistency(ConsistencyError::UnknownProgram {
            program: "p99".to_string(),
            root: PathBuf::from("/content"),
        });
        assert!(err.is_inconsistency());
        assert_eq!(
            err.message(),
            "Program [p99] not found in content root /content."
        );
    }

    #[test]
    fn test_plain_executor_error_has_no_cause() {
        let err = ExecutorError::new("Content unit [abc123] not found.");
        assert!(!err.is_inconsistency());
        assert!(err.cause().is_none());
        assert_eq!(err.to_string(), "Content unit [abc123] not found.");
    }

    #[test]
    fn test_render_trace_lists_causes() {
        let io = std::io::Error::other("disk on fire");
        let err = ExecutorError::with_cause("Cleaning failed.", io);
        let trace = err.render_trace();
        assert!(trace.starts_with("ExecutorError: Cleaning failed.\n"));
        assert!(trace.contains("Caused by:"));
        assert!(trace.contains("0: disk on fire"));
        assert!(trace.contains("Stack backtrace:"));
    }

    #[test]
    fn test_path_assertions() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        assert!(PathConsistencyError::assert_is_existing_directory(temp.path()).is_ok());

        let missing = temp.path().join("missing");
        assert!(matches!(
            PathConsistencyError::assert_is_existing_directory(&missing),
            Err(PathConsistencyError::NotExisting(_))
        ));

        let file = temp.path().join("file.txt");
        std::fs::write(&file, "x").expect("write file");
        assert!(matches!(
            PathConsistencyError::assert_is_existing_directory(&file),
            Err(PathConsistencyError::NotADirectory(_))
        ));
    }
}

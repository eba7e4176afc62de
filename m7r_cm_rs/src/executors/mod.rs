//! Command executors.
//!
//! One executor per command path, bound in the catalog. Executors never write
//! to the console: they return an [`ExecutorOutput`] and the entrypoint
//! prints it.

mod build;
mod check;
mod clean;
mod info;
mod media;
mod show;

pub use build::BuildExecutor;
pub use check::CheckExecutor;
pub use clean::CleanExecutor;
pub use info::InfoExecutor;
pub use media::{MediaListExecutor, MediaPruneExecutor};
pub use show::ShowStructureExecutor;

use crate::cli::call::ParsedCall;
use crate::content::{ContentRoot, Program};
use crate::context::ExecutionContext;
use crate::error::{ConsistencyError, ExecutorError};

pub trait CommandExecutor {
    fn execute(
        &self,
        call: &ParsedCall,
        context: &ExecutionContext,
    ) -> Result<ExecutorOutput, ExecutorError>;
}

/// Result lines plus an optional one-line summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutorOutput {
    pub lines: Vec<String>,
    pub summary: Option<String>,
}

impl ExecutorOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Programs named by the call parameters, or all programs when none are given.
pub(crate) fn select_programs(
    call: &ParsedCall,
    context: &ExecutionContext,
) -> Result<Vec<Program>, ExecutorError> {
    let root = ContentRoot::new(context.content_root());
    let unreadable = |e: std::io::Error| ExecutorError::with_cause("Cannot read content root.", e);
    if call.parameters().is_empty() {
        return root.programs().map_err(unreadable);
    }

    let mut selected: Vec<Program> = Vec::new();
    for name in call.parameters() {
        if selected.iter().any(|p| p.name() == name) {
            continue;
        }
        let program = root
            .find_program(name)
            .map_err(unreadable)?
            .ok_or_else(|| ConsistencyError::UnknownProgram {
                program: name.clone(),
                root: context.content_root().to_path_buf(),
            })?;
        selected.push(program);
    }
    Ok(selected)
}

pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

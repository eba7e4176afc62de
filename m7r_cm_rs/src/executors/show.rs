//! `show structure [program...]`: program directories as trees.

use std::cmp::Ordering;
use std::io;
use std::path::Path;

use super::{CommandExecutor, ExecutorOutput, plural, select_programs};
use crate::cli::call::ParsedCall;
use crate::context::ExecutionContext;
use crate::error::ExecutorError;

#[derive(Debug, Default)]
pub struct ShowStructureExecutor;

impl CommandExecutor for ShowStructureExecutor {
    fn execute(
        &self,
        call: &ParsedCall,
        context: &ExecutionContext,
    ) -> Result<ExecutorOutput, ExecutorError> {
        let programs = select_programs(call, context)?;
        let mut output = ExecutorOutput::new();
        for program in &programs {
            output.line(program.name());
            let mut prefix_parts = Vec::new();
            walk(program.path(), &mut prefix_parts, &mut output.lines).map_err(|e| {
                ExecutorError::with_cause(
                    format!("Cannot read structure of program [{}].", program.name()),
                    e,
                )
            })?;
        }
        Ok(output.with_summary(format!("{} shown.", plural(programs.len(), "program"))))
    }
}

fn walk(dir: &Path, prefix_parts: &mut Vec<bool>, lines: &mut Vec<String>) -> io::Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .collect();
    sort_dir_entries(&mut entries);

    let len = entries.len();
    for (idx, entry) in entries.into_iter().enumerate() {
        let is_last = idx + 1 == len;
        let mut prefix = String::new();
        for &has_more in prefix_parts.iter() {
            if has_more {
                prefix.push_str("│   ");
            } else {
                prefix.push_str("    ");
            }
        }
        let branch = if is_last { "└── " } else { "├── " };
        let name = entry.file_name().to_string_lossy().to_string();
        lines.push(format!("{prefix}{branch}{name}"));

        // Symlinked directories are listed but not entered.
        if entry.file_type()?.is_dir() {
            prefix_parts.push(!is_last);
            walk(&entry.path(), prefix_parts, lines)?;
            prefix_parts.pop();
        }
    }
    Ok(())
}

/// Directories first, then case-insensitive by name.
fn sort_dir_entries(entries: &mut [std::fs::DirEntry]) {
    entries.sort_by(|a, b| {
        let a_is_dir = is_real_dir(a);
        let b_is_dir = is_real_dir(b);
        match (a_is_dir, b_is_dir) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a
                .file_name()
                .to_string_lossy()
                .to_lowercase()
                .cmp(&b.file_name().to_string_lossy().to_lowercase()),
        }
    });
}

fn is_real_dir(entry: &std::fs::DirEntry) -> bool {
    entry.file_type().is_ok_and(|t| t.is_dir())
}

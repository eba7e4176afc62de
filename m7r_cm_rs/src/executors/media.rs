//! `media ls` and `media prune`.

use super::{CommandExecutor, ExecutorOutput, plural, select_programs};
use crate::cli::call::ParsedCall;
use crate::cli::catalog::{OPTION_MEDIA_ABSOLUTE, OPTION_MEDIA_ORPHANED};
use crate::content::media::prune;
use crate::content::{MediaIndex, MediaResource, Program};
use crate::context::ExecutionContext;
use crate::error::ExecutorError;

fn scan(program: &Program, context: &ExecutionContext) -> Result<MediaIndex, ExecutorError> {
    MediaIndex::scan(program, context.config()).map_err(|e| {
        ExecutorError::with_cause(
            format!("Cannot scan media of program [{}].", program.name()),
            e,
        )
    })
}

/// Lists referenced media, or orphaned ones with `--orphaned`.
#[derive(Debug, Default)]
pub struct MediaListExecutor;

impl CommandExecutor for MediaListExecutor {
    fn execute(
        &self,
        call: &ParsedCall,
        context: &ExecutionContext,
    ) -> Result<ExecutorOutput, ExecutorError> {
        let options = call.specific_options();
        let orphaned = options.has_option(OPTION_MEDIA_ORPHANED);
        let absolute = options.has_option(OPTION_MEDIA_ABSOLUTE);

        let programs = select_programs(call, context)?;
        let mut output = ExecutorOutput::new();
        let mut count = 0;
        for program in &programs {
            let index = scan(program, context)?;
            let selected: Vec<&MediaResource> = if orphaned {
                index.orphaned().collect()
            } else {
                index.referenced().collect()
            };
            for resource in selected {
                count += 1;
                if absolute {
                    output.line(resource.path().display().to_string());
                } else {
                    output.line(format!(
                        "{}/media/{}",
                        resource.program(),
                        resource.relative_display()
                    ));
                }
            }
        }
        let kind = if orphaned { "orphaned" } else { "referenced" };
        Ok(output.with_summary(format!(
            "{} {kind} in {}.",
            plural(count, "media resource"),
            plural(programs.len(), "program")
        )))
    }
}

/// Moves orphaned media to the pruned directory.
#[derive(Debug, Default)]
pub struct MediaPruneExecutor;

impl CommandExecutor for MediaPruneExecutor {
    fn execute(
        &self,
        call: &ParsedCall,
        context: &ExecutionContext,
    ) -> Result<ExecutorOutput, ExecutorError> {
        let programs = select_programs(call, context)?;
        let mut output = ExecutorOutput::new();
        let mut count = 0;
        for program in &programs {
            let pruned = prune(program, context.config()).map_err(|e| {
                ExecutorError::with_cause(
                    format!("Pruning media of program [{}] failed.", program.name()),
                    e,
                )
            })?;
            for moved in &pruned {
                output.line(format!(
                    "{} -> {}",
                    moved.from.display(),
                    moved.to.display()
                ));
            }
            count += pruned.len();
        }
        Ok(output.with_summary(format!(
            "{} pruned.",
            plural(count, "media resource")
        )))
    }
}

//! `build [program...]`

use super::{CommandExecutor, ExecutorOutput, plural, select_programs};
use crate::cli::call::ParsedCall;
use crate::content::build::{clean_output, output_path, write_output};
use crate::content::{BuildHandler, MdpBuildHandler, Program};
use crate::context::ExecutionContext;
use crate::error::ExecutorError;

pub struct BuildExecutor {
    handler: Box<dyn BuildHandler>,
}

impl BuildExecutor {
    pub fn new(handler: impl BuildHandler + 'static) -> Self {
        Self {
            handler: Box::new(handler),
        }
    }

    /// Rebuild one program from scratch. Returns the number of units built.
    fn build_program(
        &self,
        program: &Program,
        context: &ExecutionContext,
        output: &mut ExecutorOutput,
    ) -> Result<usize, ExecutorError> {
        let config = context.config();
        let failed = || format!("Build failed for program [{}].", program.name());

        clean_output(program, config).map_err(|e| ExecutorError::with_cause(failed(), e))?;
        let units = program
            .units()
            .map_err(|e| ExecutorError::with_cause(failed(), e))?;
        for unit in &units {
            let lines = self
                .handler
                .compile(unit)
                .map_err(|e| ExecutorError::with_cause(failed(), e))?;
            let path = output_path(program, unit, config);
            write_output(&path, &lines).map_err(|e| ExecutorError::with_cause(failed(), e))?;
            if context.is_verbose() {
                output.line(format!("  {} -> {}", unit.id(), path.display()));
            }
        }
        Ok(units.len())
    }
}

impl Default for BuildExecutor {
    fn default() -> Self {
        Self::new(MdpBuildHandler)
    }
}

impl CommandExecutor for BuildExecutor {
    fn execute(
        &self,
        call: &ParsedCall,
        context: &ExecutionContext,
    ) -> Result<ExecutorOutput, ExecutorError> {
        let programs = select_programs(call, context)?;
        let mut output = ExecutorOutput::new();
        let mut total = 0;
        for program in &programs {
            tracing::debug!(program = program.name(), "building");
            let built = self.build_program(program, context, &mut output)?;
            output.line(format!(
                "Built program [{}]: {}.",
                program.name(),
                plural(built, "content unit")
            ));
            total += built;
        }
        Ok(output.with_summary(format!(
            "Build finished: {}, {}.",
            plural(programs.len(), "program"),
            plural(total, "content unit")
        )))
    }
}

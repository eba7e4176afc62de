//! `clean [program...]`

use super::{CommandExecutor, ExecutorOutput, plural, select_programs};
use crate::cli::call::ParsedCall;
use crate::content::build::clean_output;
use crate::context::ExecutionContext;
use crate::error::ExecutorError;

#[derive(Debug, Default)]
pub struct CleanExecutor;

impl CommandExecutor for CleanExecutor {
    fn execute(
        &self,
        call: &ParsedCall,
        context: &ExecutionContext,
    ) -> Result<ExecutorOutput, ExecutorError> {
        let programs = select_programs(call, context)?;
        let mut output = ExecutorOutput::new();
        let mut cleaned = 0;
        for program in &programs {
            let removed = clean_output(program, context.config()).map_err(|e| {
                ExecutorError::with_cause(
                    format!("Cleaning program [{}] failed.", program.name()),
                    e,
                )
            })?;
            if removed {
                cleaned += 1;
                output.line(format!("Cleaned program [{}].", program.name()));
            } else if context.is_verbose() {
                output.line(format!("Program [{}] has no build output.", program.name()));
            }
        }
        Ok(output.with_summary(format!(
            "Clean finished: {} cleaned.",
            plural(cleaned, "program")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executors::test_support::{call_in, content_tree, write};

    #[test]
    fn test_clean_removes_output_dirs() {
        let temp = content_tree();
        write(temp.path(), "docA/html/docA_intro.html", "x");
        let (call, ctx) = call_in(temp.path(), &["clean"]);

        let output = CleanExecutor.execute(&call, &ctx).expect("clean");
        assert!(!temp.path().join("docA/html").exists());
        assert!(temp.path().join("docA/mdp/intro.mdp").is_file());
        assert_eq!(output.lines, vec!["Cleaned program [docA]."]);
        assert_eq!(
            output.summary.as_deref(),
            Some("Clean finished: 1 program cleaned.")
        );
    }

    #[test]
    fn test_clean_respects_configured_output_dir() {
        let temp = content_tree();
        write(temp.path(), ".m7r-cm/config.toml", "[build]\noutput_dir = \"out\"\n");
        write(temp.path(), "docB/out/docB_welcome.html", "x");
        write(temp.path(), "docB/html/keep.html", "x");
        let (call, ctx) = call_in(temp.path(), &["clean", "docB"]);

        CleanExecutor.execute(&call, &ctx).expect("clean");
        assert!(!temp.path().join("docB/out").exists());
        assert!(temp.path().join("docB/html/keep.html").is_file());
    }
}

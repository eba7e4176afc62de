//! `check <content-id>`: compile a single unit, write nothing.

use super::{CommandExecutor, ExecutorOutput};
use crate::cli::call::ParsedCall;
use crate::content::{BuildHandler, ContentRoot, MdpBuildHandler};
use crate::context::ExecutionContext;
use crate::error::ExecutorError;

pub struct CheckExecutor {
    handler: Box<dyn BuildHandler>,
}

impl CheckExecutor {
    pub fn new(handler: impl BuildHandler + 'static) -> Self {
        Self {
            handler: Box::new(handler),
        }
    }
}

impl Default for CheckExecutor {
    fn default() -> Self {
        Self::new(MdpBuildHandler)
    }
}

impl CommandExecutor for CheckExecutor {
    fn execute(
        &self,
        call: &ParsedCall,
        context: &ExecutionContext,
    ) -> Result<ExecutorOutput, ExecutorError> {
        // Arity is enforced by the parser.
        let Some(id) = call.parameters().first() else {
            return Err(ExecutorError::new("Content id expected."));
        };

        let root = ContentRoot::new(context.content_root());
        let unit = root
            .find_unit(id)
            .map_err(|e| ExecutorError::with_cause("Cannot read content root.", e))?
            .ok_or_else(|| ExecutorError::new(format!("Content unit [{id}] not found.")))?;

        let lines = self
            .handler
            .compile(&unit)
            .map_err(|e| ExecutorError::with_cause(format!("Check failed for [{id}]."), e))?;

        let mut output = ExecutorOutput::new();
        if context.is_verbose() {
            for line in &lines {
                output.line(line.as_str());
            }
        }
        Ok(output.with_summary(format!("Content unit [{id}] checked: OK.")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executors::test_support::{call_in, content_tree};

    #[test]
    fn test_check_known_unit() {
        let temp = content_tree();
        let (call, ctx) = call_in(temp.path(), &["check", "docA_m01_step"]);
        let output = CheckExecutor::default().execute(&call, &ctx).expect("check");
        assert!(output.lines.is_empty());
        assert_eq!(
            output.summary.as_deref(),
            Some("Content unit [docA_m01_step] checked: OK.")
        );
        assert!(!temp.path().join("docA/html").exists());
    }

    #[test]
    fn test_check_verbose_shows_compiled_lines() {
        let temp = content_tree();
        let (call, ctx) = call_in(temp.path(), &["--verbose", "check", "docB_welcome"]);
        let output = CheckExecutor::default().execute(&call, &ctx).expect("check");
        assert_eq!(output.lines.first().map(String::as_str), Some("<!--"));
        assert_eq!(output.lines.last().map(String::as_str), Some("@h1 Welcome"));
    }

    #[test]
    fn test_check_unknown_unit_is_plain_executor_error() {
        let temp = content_tree();
        let (call, ctx) = call_in(temp.path(), &["check", "abc123"]);
        let err = CheckExecutor::default().execute(&call, &ctx).unwrap_err();
        assert!(!err.is_inconsistency());
        assert_eq!(err.message(), "Content unit [abc123] not found.");
    }
}

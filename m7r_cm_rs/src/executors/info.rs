//! Default command: program info.

use super::{CommandExecutor, ExecutorOutput};
use crate::cli::call::ParsedCall;
use crate::cli::definition::CliDescription;
use crate::context::ExecutionContext;
use crate::error::ExecutorError;

pub struct InfoExecutor {
    description: CliDescription,
}

impl InfoExecutor {
    pub fn new(description: CliDescription) -> Self {
        Self { description }
    }
}

impl CommandExecutor for InfoExecutor {
    fn execute(
        &self,
        _call: &ParsedCall,
        _context: &ExecutionContext,
    ) -> Result<ExecutorOutput, ExecutorError> {
        let exe = self.description.executable_name();
        let mut output = ExecutorOutput::new();
        output.line(exe);
        for line in self.description.description().lines() {
            output.line(line);
        }
        output.line(format!("Version: {}", self.description.version_text()));
        output.line(format!("Call '{exe} -h' for help."));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executors::test_support::call_in;
    use tempfile::TempDir;

    #[test]
    fn test_info_lines() {
        let temp = TempDir::new().expect("temp dir");
        let (call, ctx) = call_in(temp.path(), &[]);
        let executor = InfoExecutor::new(
            CliDescription::new("m7r-cm", "content manager\nhttps://example.org", "0.1.0")
                .with_version_date("2021-12-21"),
        );
        let output = executor.execute(&call, &ctx).expect("info");
        assert_eq!(
            output.lines,
            vec![
                "m7r-cm",
                "content manager",
                "https://example.org",
                "Version: 0.1.0 from 2021-12-21",
                "Call 'm7r-cm -h' for help.",
            ]
        );
        assert!(output.summary.is_none());
    }
}

//! Dispatcher: parsed call -> executor.
//!
//! `--help` and `--version` short-circuit before any context is built.
//! Otherwise the executor bound to the call's path is resolved, the
//! execution context is derived and the executor runs exactly once.

use super::call::ParsedCall;
use super::definition::{Cli, OPTION_HELP, OPTION_VERSION};
use super::help;
use crate::context::ExecutionContext;
use crate::error::ExecutorError;
use crate::executors::{CommandExecutor, ExecutorOutput};

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// Help or version text; nothing was executed.
    ShowText(String),
    Completed(ExecutorOutput),
}

pub fn dispatch(cli: &Cli, call: &ParsedCall) -> Result<DispatchResult, ExecutorError> {
    let globals = call.global_options();
    if globals.has_option(OPTION_HELP) {
        let text = match cli.command_for(call) {
            Some(command) => help::format_command_help(cli, command),
            None => help::format_help(cli),
        };
        return Ok(DispatchResult::ShowText(text));
    }
    if globals.has_option(OPTION_VERSION) {
        return Ok(DispatchResult::ShowText(help::format_version(cli)));
    }

    let executor = resolve_executor(cli, call)?;
    let context = ExecutionContext::from_call(call).map_err(ExecutorError::inconsistency)?;
    tracing::debug!(
        command = %call.command_path().join(" "),
        root = %context.content_root().display(),
        "executing"
    );
    executor
        .execute(call, &context)
        .map(DispatchResult::Completed)
}

fn resolve_executor<'a>(
    cli: &'a Cli,
    call: &ParsedCall,
) -> Result<&'a dyn CommandExecutor, ExecutorError> {
    if call.is_default_command() {
        return cli
            .commands()
            .default_command()
            .ok_or_else(|| ExecutorError::new("No default command registered."));
    }
    cli.command_for(call)
        .map(|command| command.executor())
        .ok_or_else(|| {
            ExecutorError::new(format!(
                "No executor bound to '{}'.",
                call.command_path().join(" ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::cli::catalog::{OPTION_CONTENT_ROOT, cli_description, create_cli};
    use crate::cli::command::{CommandBuilder, Commands, OptionBuilder, Options, Parameters};
    use crate::cli::definition::CliBuilder;
    use tempfile::TempDir;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[derive(Clone, Default)]
    struct Counting(Rc<Cell<usize>>);

    impl CommandExecutor for Counting {
        fn execute(
            &self,
            _call: &ParsedCall,
            _context: &ExecutionContext,
        ) -> Result<ExecutorOutput, ExecutorError> {
            self.0.set(self.0.get() + 1);
            Ok(ExecutorOutput::new().with_summary("counted"))
        }
    }

    fn counting_cli(counter: &Counting) -> Cli {
        let commands = Commands::new()
            .add(
                CommandBuilder::new()
                    .commands(["count"])
                    .parameters(Parameters::None)
                    .executor(counter.clone())
                    .build()
                    .expect("command"),
            )
            .expect("add");
        CliBuilder::new()
            .global_options(
                Options::new()
                    .add(
                        OptionBuilder::new()
                            .short_name('p')
                            .long_name("content-root")
                            .argument_name("path")
                            .build(OPTION_CONTENT_ROOT)
                            .expect("option"),
                    )
                    .expect("add"),
            )
            .commands(commands)
            .with_auto_help()
            .with_version()
            .build(cli_description())
            .expect("cli")
    }

    #[test]
    fn test_help_short_circuits() {
        let cli = create_cli().expect("catalog");
        let call = cli.parse(&args(&["--help"])).expect("parse");
        match dispatch(&cli, &call).expect("dispatch") {
            DispatchResult::ShowText(text) => assert!(text.contains("Commands:")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_command_help_ignores_arity() {
        let cli = create_cli().expect("catalog");
        let call = cli.parse(&args(&["check", "--help"])).expect("parse");
        match dispatch(&cli, &call).expect("dispatch") {
            DispatchResult::ShowText(text) => assert!(text.contains("check <content-id>")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_version_short_circuits() {
        let cli = create_cli().expect("catalog");
        let call = cli.parse(&args(&["--version"])).expect("parse");
        assert!(matches!(
            dispatch(&cli, &call).expect("dispatch"),
            DispatchResult::ShowText(text) if text.starts_with("m7r-cm ")
        ));
    }

    #[test]
    fn test_executor_invoked_once() {
        let temp = TempDir::new().expect("temp dir");
        let counter = Counting::default();
        let cli = counting_cli(&counter);
        let root = temp.path().to_string_lossy().to_string();
        let call = cli.parse(&args(&["-p", &root, "count"])).expect("parse");

        let result = dispatch(&cli, &call).expect("dispatch");
        assert_eq!(counter.0.get(), 1);
        assert_eq!(
            result,
            DispatchResult::Completed(ExecutorOutput::new().with_summary("counted"))
        );
    }

    #[test]
    fn test_bad_root_skips_executor() {
        let temp = TempDir::new().expect("temp dir");
        let counter = Counting::default();
        let cli = counting_cli(&counter);
        let missing = temp.path().join("missing").to_string_lossy().to_string();
        let call = cli.parse(&args(&["-p", &missing, "count"])).expect("parse");

        let err = dispatch(&cli, &call).unwrap_err();
        assert!(err.is_inconsistency());
        assert!(err.message().starts_with("Path not found:"));
        assert_eq!(counter.0.get(), 0);
    }
}

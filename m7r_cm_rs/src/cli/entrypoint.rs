//! Top-level entry point and error handler for the `m7r-cm` binary.
//!
//! Parses the call, sets up the console, dispatches and maps every outcome
//! to console output and an exit code:
//!
//! | outcome                         | output                                  | exit |
//! |---------------------------------|-----------------------------------------|------|
//! | syntax error                    | 3 lines on stdout (unless `--silent`)   | 1    |
//! | executor error, consistency     | message via `error_out`                 | 1    |
//! | executor error, other           | `Execution failed: <message>`           | 1    |
//! | panic in dispatcher or executor | `Internal error: <message>`             | 1    |
//! | success                         | result lines, then summary              | 0    |
//!
//! With `--stacktrace` every failure branch also writes the fault trace to
//! the error stream.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use tracing_subscriber::EnvFilter;

use super::call::ParsedCall;
use super::catalog::{OPTION_STACKTRACE, OPTION_VERBOSE, create_cli};
use super::definition::{Cli, OPTION_HELP, OPTION_VERSION};
use super::dispatch::{DispatchResult, dispatch};
use super::error::UnrecognizedArgumentError;
use crate::console::{Console, ConsoleConfig};
use crate::error::ExecutorError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Tag prepended to unclassified executor failures.
pub const EXECUTION_FAILED_TAG: &str = "Execution failed: ";

const SILENT_FLAG: &str = "--silent";

// ============================================================================
// Panic capture
// ============================================================================

struct PanicRecord {
    location: String,
    backtrace: String,
}

thread_local! {
    static LAST_PANIC: RefCell<Option<PanicRecord>> = const { RefCell::new(None) };
}

/// Replace the default panic hook.
///
/// Broken pipes (output piped to `head`) exit quietly. Any other panic is
/// recorded for the error handler, which reports it as an internal error;
/// the hook itself prints nothing.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        if panic_message(payload).contains("Broken pipe") {
            std::process::exit(EXIT_SUCCESS);
        }
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "<unknown>".to_string());
        let record = PanicRecord {
            location,
            backtrace: Backtrace::force_capture().to_string(),
        };
        LAST_PANIC.with(|slot| *slot.borrow_mut() = Some(record));
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::new()
    }
}

fn panic_trace(message: &str) -> String {
    let record = LAST_PANIC.with(|slot| slot.borrow_mut().take());
    match record {
        Some(record) => format!(
            "panicked at {}: {message}\nStack backtrace:\n{}",
            record.location, record.backtrace
        ),
        None => format!(
            "panicked: {message}\nStack backtrace:\n{}",
            Backtrace::force_capture()
        ),
    }
}

// ============================================================================
// Entry
// ============================================================================

/// Shared `main()` body: process args, stdio, exit code.
pub fn main_entry() -> i32 {
    // Executable name (args[0]) is taken from the catalog.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match create_cli() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = writeln!(io::stderr(), "Internal error: invalid command catalog: {err}");
            return EXIT_FAILURE;
        }
    };
    run(&cli, &args, Box::new(io::stdout()), Box::new(io::stderr()))
}

/// Run one invocation against the given streams and return the exit code.
pub fn run(cli: &Cli, args: &[String], standard: Box<dyn Write>, error: Box<dyn Write>) -> i32 {
    let call = match cli.parse(args) {
        Ok(call) => call,
        Err(err) => {
            let config = ConsoleConfig {
                silent: args.iter().any(|a| a == SILENT_FLAG),
                ..ConsoleConfig::plain()
            };
            let mut console = Console::new(&config, standard, error);
            report_syntax_error(&mut console, &err);
            return EXIT_FAILURE;
        }
    };

    let config = ConsoleConfig::from_call(&call);
    if config.logger_name.is_some() {
        init_logger();
    }
    let mut console = Console::new(&config, standard, error);
    let stacktrace = call.global_options().has_option(OPTION_STACKTRACE);

    if wants_welcome(&call) {
        let description = cli.description();
        console.out(&format!(
            "{} - Version {}",
            description.description_first_line(),
            description.version_text()
        ));
        console.out("");
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| dispatch(cli, &call)));
    match outcome {
        Ok(Ok(DispatchResult::ShowText(text))) => {
            for line in text.lines() {
                console.out(line);
            }
            EXIT_SUCCESS
        }
        Ok(Ok(DispatchResult::Completed(output))) => {
            for line in &output.lines {
                console.out(line);
            }
            if let Some(summary) = &output.summary {
                console.summary(summary);
            }
            EXIT_SUCCESS
        }
        Ok(Err(err)) => {
            report_executor_error(&mut console, &err, stacktrace);
            EXIT_FAILURE
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            console.internal_error_out(&message);
            let trace = panic_trace(&message);
            if stacktrace {
                console.trace(&trace);
            }
            EXIT_FAILURE
        }
    }
}

fn wants_welcome(call: &ParsedCall) -> bool {
    let globals = call.global_options();
    globals.has_option(OPTION_VERBOSE)
        && !globals.has_option(OPTION_HELP)
        && !globals.has_option(OPTION_VERSION)
}

fn report_syntax_error(console: &mut Console, err: &UnrecognizedArgumentError) {
    console.out(&format!(
        "{} call syntax error. {}",
        err.executable_name(),
        err.message()
    ));
    console.out(err.call_string());
    console.out(err.call_pointer_string());
}

fn report_executor_error(console: &mut Console, err: &ExecutorError, stacktrace: bool) {
    if err.is_inconsistency() {
        console.error_out(err.message());
    } else if !err.message().is_empty() {
        console.error_out(&format!("{EXECUTION_FAILED_TAG}{}", err.message()));
    }
    if stacktrace {
        console.trace(&err.render_trace());
    }
}

/// stderr subscriber for `--logger`; `RUST_LOG` overrides the `info` default.
fn init_logger() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

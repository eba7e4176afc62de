//! The m7r-cm command catalog: global options, commands and executors.

use super::command::{CommandBuilder, Commands, OptionBuilder, Options, Parameters};
use super::definition::{Cli, CliBuilder, CliDescription};
use super::error::CliDefinitionError;
use crate::executors::{
    BuildExecutor, CheckExecutor, CleanExecutor, InfoExecutor, MediaListExecutor,
    MediaPruneExecutor, ShowStructureExecutor,
};

pub const EXECUTABLE_NAME: &str = "m7r-cm";
pub const VERSION_DATE: &str = "2021-12-21";

pub const OPTION_VERBOSE: &str = "verbose";
pub const OPTION_STACKTRACE: &str = "stacktrace";
pub const OPTION_CONTENT_ROOT: &str = "content_root";
pub const OPTION_SILENT: &str = "silent";
pub const OPTION_LOGGER: &str = "logger";
pub const OPTION_LOGGER_NAME: &str = "logger_name";
pub const OPTION_NO_COLOR: &str = "no_color";
pub const OPTION_NO_SUMMARY: &str = "no_summary";

pub const OPTION_MEDIA_ABSOLUTE: &str = "absolute";
pub const OPTION_MEDIA_ORPHANED: &str = "orphaned";

pub fn cli_description() -> CliDescription {
    CliDescription::new(
        EXECUTABLE_NAME,
        "mentalizr content manager CLI\nhttps://github.com/mentalizr/m7r-content-manager-cli",
        env!("CARGO_PKG_VERSION"),
    )
    .with_version_date(VERSION_DATE)
}

fn global_options() -> Result<Options, CliDefinitionError> {
    Options::new()
        .add(
            OptionBuilder::new()
                .long_name("verbose")
                .description("verbose output")
                .build(OPTION_VERBOSE)?,
        )?
        .add(
            OptionBuilder::new()
                .short_name('p')
                .long_name("content-root")
                .argument_name("path")
                .description("Path to content root directory.")
                .build(OPTION_CONTENT_ROOT)?,
        )?
        .add(
            OptionBuilder::new()
                .short_name('s')
                .long_name("stacktrace")
                .description("Show stacktrace when running on error.")
                .build(OPTION_STACKTRACE)?,
        )?
        .add(
            OptionBuilder::new()
                .long_name("silent")
                .description("Make no output to console.")
                .build(OPTION_SILENT)?,
        )?
        .add(
            OptionBuilder::new()
                .long_name("no-color")
                .description("Omit colorization on console output.")
                .build(OPTION_NO_COLOR)?,
        )?
        .add(
            OptionBuilder::new()
                .long_name("no-summary")
                .description("Omit summary on output.")
                .build(OPTION_NO_SUMMARY)?,
        )?
        .add(
            OptionBuilder::new()
                .short_name('l')
                .long_name("logger")
                .description("Print output to logger.")
                .build(OPTION_LOGGER)?,
        )?
        .add(
            OptionBuilder::new()
                .long_name("logger-name")
                .argument_name("name")
                .description("Name of logger. Default is 'm7r_cm'.")
                .build(OPTION_LOGGER_NAME)?,
        )
}

fn media_list_options() -> Result<Options, CliDefinitionError> {
    Options::new()
        .add(
            OptionBuilder::new()
                .short_name('a')
                .long_name("absolute")
                .description("as absolute path")
                .build(OPTION_MEDIA_ABSOLUTE)?,
        )?
        .add(
            OptionBuilder::new()
                .short_name('o')
                .long_name("orphaned")
                .description("show unreferenced (orphaned) media resources only")
                .build(OPTION_MEDIA_ORPHANED)?,
        )
}

fn commands(description: &CliDescription) -> Result<Commands, CliDefinitionError> {
    Commands::new()
        .set_default_command(InfoExecutor::new(description.clone()))
        .add(
            CommandBuilder::new()
                .commands(["build"])
                .parameters(Parameters::min(0, "program", "programs to be built"))
                .executor(BuildExecutor::default())
                .description(
                    "Executes a build on specified programs or on all programs if none is specified.",
                )
                .build()?,
        )?
        .add(
            CommandBuilder::new()
                .commands(["clean"])
                .parameters(Parameters::min(0, "program", "programs to be cleaned"))
                .executor(CleanExecutor)
                .description("Cleans specified programs or all programs if none is specified.")
                .build()?,
        )?
        .add(
            CommandBuilder::new()
                .commands(["show", "structure"])
                .parameters(Parameters::min(0, "program", "programs to be shown"))
                .executor(ShowStructureExecutor)
                .description(
                    "Shows program structure for specified programs or for all programs if none is specified.",
                )
                .build()?,
        )?
        .add(
            CommandBuilder::new()
                .commands(["media", "ls"])
                .specific_options(media_list_options()?)
                .parameters(Parameters::min(
                    0,
                    "program",
                    "programs to be applied for listing media resources.",
                ))
                .executor(MediaListExecutor)
                .description(
                    "Lists all media resources of specified programs. By default referenced ones.",
                )
                .build()?,
        )?
        .add(
            CommandBuilder::new()
                .commands(["media", "prune"])
                .parameters(Parameters::min(
                    0,
                    "program",
                    "programs to be applied for pruning media resources.",
                ))
                .executor(MediaPruneExecutor)
                .description(
                    "Move all orphaned media resources of specified programs to program directory media-pruned.",
                )
                .build()?,
        )?
        .add(
            CommandBuilder::new()
                .commands(["check"])
                .parameters(Parameters::one(
                    "content-id",
                    "content id of mdp file to be checked",
                ))
                .executor(CheckExecutor::default())
                .description(
                    "Checks a single mdp file for syntactical correctness. With no impact on the repo state. For development purposes.",
                )
                .build()?,
        )
}

/// Assemble the full CLI. Fails only on a broken catalog.
pub fn create_cli() -> Result<Cli, CliDefinitionError> {
    let description = cli_description();
    CliBuilder::new()
        .global_options(global_options()?)
        .commands(commands(&description)?)
        .with_version()
        .with_auto_help()
        .build(description)
}

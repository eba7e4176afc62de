//! The assembled CLI: description, global options and command registry.
//!
//! Built once at startup through [`CliBuilder`]; every registration check
//! (duplicate options, ambiguous paths, specific options shadowing global
//! ones) runs here, before any argument is parsed.

use super::call::ParsedCall;
use super::command::{CommandDefinition, Commands, OptionBuilder, Options};
use super::error::{CliDefinitionError, UnrecognizedArgumentError};
use super::parser;

/// Identifier of the built-in `-h/--help` option.
pub const OPTION_HELP: &str = "help";
/// Identifier of the built-in `--version` option.
pub const OPTION_VERSION: &str = "version";

/// Name, description and version text of the executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliDescription {
    executable_name: String,
    description: String,
    version: String,
    version_date: Option<String>,
}

impl CliDescription {
    pub fn new(
        executable_name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            executable_name: executable_name.into(),
            description: description.into(),
            version: version.into(),
            version_date: None,
        }
    }

    pub fn with_version_date(mut self, date: impl Into<String>) -> Self {
        self.version_date = Some(date.into());
        self
    }

    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn description_first_line(&self) -> &str {
        self.description.lines().next().unwrap_or_default()
    }

    /// `0.1.0 from 2021-12-21`, or just the version without a date.
    pub fn version_text(&self) -> String {
        let mut text = self.version.clone();
        if let Some(date) = &self.version_date {
            text.push_str(&format!(" from {date}"));
        }
        text
    }
}

pub struct Cli {
    description: CliDescription,
    global_options: Options,
    commands: Commands,
}

impl Cli {
    pub fn description(&self) -> &CliDescription {
        &self.description
    }

    pub fn global_options(&self) -> &Options {
        &self.global_options
    }

    pub fn commands(&self) -> &Commands {
        &self.commands
    }

    /// Resolve the definition a parsed call refers to (`None` for the default command).
    pub fn command_for(&self, call: &ParsedCall) -> Option<&CommandDefinition> {
        if call.is_default_command() {
            None
        } else {
            self.commands.find(call.command_path())
        }
    }

    /// Parse raw arguments (without the executable name).
    pub fn parse(&self, args: &[String]) -> Result<ParsedCall, UnrecognizedArgumentError> {
        parser::parse(self, args)
    }
}

#[derive(Default)]
pub struct CliBuilder {
    global_options: Options,
    commands: Commands,
    auto_help: bool,
    version: bool,
}

impl CliBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global_options(mut self, options: Options) -> Self {
        self.global_options = options;
        self
    }

    pub fn commands(mut self, commands: Commands) -> Self {
        self.commands = commands;
        self
    }

    /// Add `-h/--help` to the global options.
    pub fn with_auto_help(mut self) -> Self {
        self.auto_help = true;
        self
    }

    /// Add `--version` to the global options.
    pub fn with_version(mut self) -> Self {
        self.version = true;
        self
    }

    pub fn build(self, description: CliDescription) -> Result<Cli, CliDefinitionError> {
        let mut global_options = self.global_options;
        if self.version {
            global_options = global_options.add(
                OptionBuilder::new()
                    .long_name("version")
                    .description("Show version information.")
                    .build(OPTION_VERSION)?,
            )?;
        }
        if self.auto_help {
            global_options = global_options.add(
                OptionBuilder::new()
                    .short_name('h')
                    .long_name("help")
                    .description("Show help message.")
                    .build(OPTION_HELP)?,
            )?;
        }
        for command in self.commands.iter() {
            global_options.assert_disjoint(command.specific_options())?;
        }
        Ok(Cli {
            description,
            global_options,
            commands: self.commands,
        })
    }
}

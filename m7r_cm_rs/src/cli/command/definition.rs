//! Command definitions: path, arity, specific options, bound executor.

use std::fmt;

use super::super::error::CliDefinitionError;
use super::options::Options;
use super::parameters::Parameters;
use crate::executors::CommandExecutor;

/// A registered command sequence such as `media ls`.
pub struct CommandDefinition {
    path: Vec<String>,
    parameters: Parameters,
    specific_options: Options,
    executor: Box<dyn CommandExecutor>,
    description: String,
}

impl CommandDefinition {
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Path tokens joined by spaces, e.g. `"show structure"`.
    pub fn name(&self) -> String {
        self.path.join(" ")
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn specific_options(&self) -> &Options {
        &self.specific_options
    }

    pub fn executor(&self) -> &dyn CommandExecutor {
        self.executor.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("path", &self.path)
            .field("parameters", &self.parameters)
            .field("specific_options", &self.specific_options)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct CommandBuilder {
    path: Vec<String>,
    parameters: Option<Parameters>,
    specific_options: Options,
    executor: Option<Box<dyn CommandExecutor>>,
    description: String,
}

impl CommandBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn specific_options(mut self, options: Options) -> Self {
        self.specific_options = options;
        self
    }

    pub fn executor(mut self, executor: impl CommandExecutor + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn build(self) -> Result<CommandDefinition, CliDefinitionError> {
        if self.path.is_empty() || self.path.iter().any(|t| t.is_empty() || t.starts_with('-'))
        {
            return Err(CliDefinitionError::InvalidCommandPath {
                path: self.path.join(" "),
            });
        }
        let executor = self
            .executor
            .ok_or_else(|| CliDefinitionError::MissingExecutor {
                path: self.path.join(" "),
            })?;
        Ok(CommandDefinition {
            path: self.path,
            parameters: self.parameters.unwrap_or(Parameters::None),
            specific_options: self.specific_options,
            executor,
            description: self.description,
        })
    }
}

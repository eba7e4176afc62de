//! Option definitions and option collections.
//!
//! An [`Options`] collection is one scope: the global options of the CLI or
//! the specific options of one command. Collisions inside a collection are
//! rejected when the option is added.

use super::super::error::CliDefinitionError;

/// A single `-x` / `--name` flag, optionally taking one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDefinition {
    id: String,
    short_name: Option<char>,
    long_name: Option<String>,
    argument_name: Option<String>,
    description: String,
}

impl OptionDefinition {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    pub fn argument_name(&self) -> Option<&str> {
        self.argument_name.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `-p, --content-root <path>` style label used in help output.
    pub fn usage_label(&self) -> String {
        let mut label = match (self.short_name, self.long_name.as_deref()) {
            (Some(short), Some(long)) => format!("-{short}, --{long}"),
            (Some(short), None) => format!("-{short}"),
            (None, Some(long)) => format!("    --{long}"),
            (None, None) => String::new(),
        };
        if let Some(arg) = &self.argument_name {
            label.push_str(&format!(" <{arg}>"));
        }
        label
    }

    fn matches_token(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return self.long_name.as_deref() == Some(long);
        }
        if let Some(short) = token.strip_prefix('-') {
            let mut chars = short.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => self.short_name == Some(c),
                _ => false,
            };
        }
        false
    }
}

/// Builder mirroring the declarative style of the command catalog.
#[derive(Debug, Default)]
pub struct OptionBuilder {
    short_name: Option<char>,
    long_name: Option<String>,
    argument_name: Option<String>,
    description: String,
}

impl OptionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn short_name(mut self, short: char) -> Self {
        self.short_name = Some(short);
        self
    }

    pub fn long_name(mut self, long: impl Into<String>) -> Self {
        self.long_name = Some(long.into());
        self
    }

    pub fn argument_name(mut self, name: impl Into<String>) -> Self {
        self.argument_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Finish the definition under identifier `id`.
    ///
    /// Fails if neither a short nor a long name was given.
    pub fn build(self, id: impl Into<String>) -> Result<OptionDefinition, CliDefinitionError> {
        let id = id.into();
        if self.short_name.is_none() && self.long_name.is_none() {
            return Err(CliDefinitionError::UnnamedOption { id });
        }
        Ok(OptionDefinition {
            id,
            short_name: self.short_name,
            long_name: self.long_name,
            argument_name: self.argument_name,
            description: self.description,
        })
    }
}

/// One option scope.
#[derive(Debug, Clone, Default)]
pub struct Options {
    definitions: Vec<OptionDefinition>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, rejecting identifier/short/long collisions.
    pub fn add(mut self, definition: OptionDefinition) -> Result<Self, CliDefinitionError> {
        if let Some(existing) = self.find_collision(&definition) {
            return Err(CliDefinitionError::DuplicateOption {
                id: definition.id.clone(),
                existing: existing.id.clone(),
                reason: collision_reason(existing, &definition),
            });
        }
        self.definitions.push(definition);
        Ok(self)
    }

    /// Check that no option of `other` collides with an option of `self`.
    ///
    /// Used to keep command-specific options apart from the global scope.
    pub fn assert_disjoint(&self, other: &Options) -> Result<(), CliDefinitionError> {
        for definition in &other.definitions {
            if let Some(existing) = self.find_collision(definition) {
                return Err(CliDefinitionError::DuplicateOption {
                    id: definition.id.clone(),
                    existing: existing.id.clone(),
                    reason: collision_reason(existing, definition),
                });
            }
        }
        Ok(())
    }

    /// Find the definition matching `-x` or `--name` exactly.
    pub fn find_by_token(&self, token: &str) -> Option<&OptionDefinition> {
        self.definitions.iter().find(|def| def.matches_token(token))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionDefinition> {
        self.definitions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    fn find_collision(&self, candidate: &OptionDefinition) -> Option<&OptionDefinition> {
        self.definitions.iter().find(|existing| {
            existing.id == candidate.id
                || (candidate.short_name.is_some() && existing.short_name == candidate.short_name)
                || (candidate.long_name.is_some() && existing.long_name == candidate.long_name)
        })
    }
}

fn collision_reason(existing: &OptionDefinition, candidate: &OptionDefinition) -> String {
    if existing.id == candidate.id {
        format!("identifier '{}' already in use", candidate.id)
    } else if candidate.short_name.is_some() && existing.short_name == candidate.short_name {
        format!(
            "short name '-{}' already in use",
            candidate.short_name.unwrap_or_default()
        )
    } else {
        format!(
            "long name '--{}' already in use",
            candidate.long_name.as_deref().unwrap_or_default()
        )
    }
}

//! Command registry backed by a prefix tree of path tokens.
//!
//! Every registered command is a leaf: a path that is a strict prefix of
//! another registered path would make `media` vs `media ls` ambiguous, so the
//! insert rejects it.

use std::collections::BTreeMap;

use super::super::error::CliDefinitionError;
use super::definition::CommandDefinition;
use crate::executors::CommandExecutor;

#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<String, Node>,
    command: Option<usize>,
}

/// Outcome of a longest-prefix lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    /// A complete command; `consumed` tokens form its path.
    Command { index: usize, consumed: usize },
    /// No token was consumed: the default command applies.
    Default,
    /// Tokens matched an inner node only. `consumed` tokens were matched and
    /// `expected` lists the possible continuations.
    Incomplete {
        consumed: usize,
        expected: Vec<String>,
    },
}

pub struct Commands {
    root: Node,
    definitions: Vec<CommandDefinition>,
    default_command: Option<Box<dyn CommandExecutor>>,
}

impl Default for Commands {
    fn default() -> Self {
        Self::new()
    }
}

impl Commands {
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            definitions: Vec::new(),
            default_command: None,
        }
    }

    pub fn set_default_command(mut self, executor: impl CommandExecutor + 'static) -> Self {
        self.default_command = Some(Box::new(executor));
        self
    }

    /// Register a command, rejecting identical and prefix-related paths.
    pub fn add(mut self, definition: CommandDefinition) -> Result<Self, CliDefinitionError> {
        let index = self.definitions.len();
        let mut clash = None;

        let mut node = &mut self.root;
        for token in definition.path() {
            if node.command.is_some() {
                clash = node.command;
                break;
            }
            node = node.children.entry(token.clone()).or_default();
        }
        if clash.is_none() {
            clash = node.command.or_else(|| first_command_below(node));
        }
        if let Some(existing) = clash {
            return Err(CliDefinitionError::AmbiguousCommand {
                path: definition.name(),
                existing: self.definitions[existing].name(),
            });
        }
        node.command = Some(index);
        self.definitions.push(definition);
        Ok(self)
    }

    /// Greedy longest-prefix match of `tokens` against registered paths.
    pub fn match_path(&self, tokens: &[String]) -> PathMatch {
        let mut node = &self.root;
        let mut consumed = 0;
        for token in tokens {
            match node.children.get(token) {
                Some(child) => {
                    node = child;
                    consumed += 1;
                    if let Some(index) = node.command {
                        return PathMatch::Command { index, consumed };
                    }
                }
                None => break,
            }
        }
        if consumed == 0 {
            PathMatch::Default
        } else {
            PathMatch::Incomplete {
                consumed,
                expected: node.children.keys().cloned().collect(),
            }
        }
    }

    /// First-level command words, for suggestions and help.
    pub fn first_tokens(&self) -> impl Iterator<Item = &str> {
        self.root.children.keys().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&CommandDefinition> {
        self.definitions.get(index)
    }

    pub fn find(&self, path: &[String]) -> Option<&CommandDefinition> {
        match self.match_path(path) {
            PathMatch::Command { index, consumed } if consumed == path.len() => self.get(index),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.definitions.iter()
    }

    pub fn default_command(&self) -> Option<&dyn CommandExecutor> {
        self.default_command.as_deref()
    }
}

fn first_command_below(node: &Node) -> Option<usize> {
    node.children
        .values()
        .find_map(|child| child.command.or_else(|| first_command_below(child)))
}

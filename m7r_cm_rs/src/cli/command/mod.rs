//! Declarative command catalog.
//!
//! - `options`: option definitions and option scopes
//! - `parameters`: positional arity rules
//! - `definition`: command definitions and their builder
//! - `registry`: prefix-tree registry with ambiguity detection

mod definition;
mod options;
mod parameters;
mod registry;

pub use definition::{CommandBuilder, CommandDefinition};
pub use options::{OptionBuilder, OptionDefinition, Options};
pub use parameters::Parameters;
pub use registry::{Commands, PathMatch};

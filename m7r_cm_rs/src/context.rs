//! Execution context derived from a parsed call.
//!
//! The context is built once per invocation, before the executor runs, and is
//! read-only afterwards.

use std::path::{Path, PathBuf};

use crate::cli::call::ParsedCall;
use crate::cli::catalog::{OPTION_CONTENT_ROOT, OPTION_STACKTRACE, OPTION_VERBOSE};
use crate::config::ContentManagerConfig;
use crate::error::{ConsistencyError, PathConsistencyError};

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    content_root: PathBuf,
    verbose: bool,
    stacktrace: bool,
    config: ContentManagerConfig,
}

impl ExecutionContext {
    /// Resolve the content root and load its configuration.
    ///
    /// An explicit `--content-root` must name an existing directory. Without
    /// it the current working directory is used as is.
    pub fn from_call(call: &ParsedCall) -> Result<Self, ConsistencyError> {
        let globals = call.global_options();
        let content_root = match globals.value(OPTION_CONTENT_ROOT) {
            Some(raw) => {
                let root = absolute(Path::new(raw))?;
                PathConsistencyError::assert_is_existing_directory(&root)?;
                root
            }
            None => std::env::current_dir().map_err(|source| {
                PathConsistencyError::Unresolvable {
                    path: PathBuf::from("."),
                    source,
                }
            })?,
        };
        tracing::debug!(root = %content_root.display(), "content root resolved");

        let config = ContentManagerConfig::load(&content_root)?;

        Ok(Self {
            content_root,
            verbose: globals.has_option(OPTION_VERBOSE),
            stacktrace: globals.has_option(OPTION_STACKTRACE),
            config,
        })
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_stacktrace(&self) -> bool {
        self.stacktrace
    }

    pub fn config(&self) -> &ContentManagerConfig {
        &self.config
    }
}

fn absolute(path: &Path) -> Result<PathBuf, PathConsistencyError> {
    std::path::absolute(path).map_err(|source| PathConsistencyError::Unresolvable {
        path: path.to_path_buf(),
        source,
    })
}

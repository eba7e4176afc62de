//! Build collaborator: compiles content units into output documents.
//!
//! Real MDP compilation lives elsewhere; [`MdpBuildHandler`] emits a comment
//! header naming the source followed by the source lines.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::program::{ContentUnit, Program};
use crate::config::ContentManagerConfig;

pub const OUTPUT_EXTENSION: &str = "html";

#[derive(Debug, Error)]
#[error("Build failed for content unit [{unit}]: {source}")]
pub struct BuildError {
    pub unit: String,
    #[source]
    pub source: io::Error,
}

pub trait BuildHandler {
    fn compile(&self, unit: &ContentUnit) -> Result<Vec<String>, BuildError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MdpBuildHandler;

impl BuildHandler for MdpBuildHandler {
    fn compile(&self, unit: &ContentUnit) -> Result<Vec<String>, BuildError> {
        let failed = |source: io::Error| BuildError {
            unit: unit.id().to_string(),
            source,
        };
        let path = std::path::absolute(unit.path()).map_err(failed)?;
        let source = std::fs::read_to_string(&path).map_err(failed)?;
        tracing::debug!(unit = unit.id(), path = %path.display(), "compiling");

        let mut lines = vec![
            "<!--".to_string(),
            path.display().to_string(),
            "-->".to_string(),
        ];
        lines.extend(source.lines().map(str::to_string));
        Ok(lines)
    }
}

/// Output file for a unit: `<program>/<output_dir>/<id>.html`.
pub fn output_path(program: &Program, unit: &ContentUnit, config: &ContentManagerConfig) -> PathBuf {
    program
        .output_dir(config)
        .join(format!("{}.{OUTPUT_EXTENSION}", unit.id()))
}

pub fn write_output(path: &Path, lines: &[String]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut body = lines.join("\n");
    body.push('\n');
    std::fs::write(path, body)
}

/// Remove the program's build output. Returns false if there was none.
pub fn clean_output(program: &Program, config: &ContentManagerConfig) -> io::Result<bool> {
    let dir = program.output_dir(config);
    if !dir.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(&dir)?;
    tracing::debug!(dir = %dir.display(), "removed build output");
    Ok(true)
}

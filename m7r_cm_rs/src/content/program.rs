//! Programs and content units below a content root.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ContentManagerConfig;

pub const MDP_DIR: &str = "mdp";
pub const MEDIA_DIR: &str = "media";
pub const MDP_EXTENSION: &str = "mdp";

/// The managed content repository.
#[derive(Debug, Clone)]
pub struct ContentRoot {
    path: PathBuf,
}

impl ContentRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All programs, sorted by name.
    ///
    /// A program is a non-hidden subdirectory holding an `mdp/` directory.
    pub fn programs(&self) -> io::Result<Vec<Program>> {
        let mut programs = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            if path.is_dir() && path.join(MDP_DIR).is_dir() {
                programs.push(Program { name, path });
            }
        }
        programs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(programs)
    }

    pub fn find_program(&self, name: &str) -> io::Result<Option<Program>> {
        Ok(self.programs()?.into_iter().find(|p| p.name == name))
    }

    /// Look up a content unit by id across all programs.
    pub fn find_unit(&self, id: &str) -> io::Result<Option<ContentUnit>> {
        for program in self.programs()? {
            if !id.starts_with(&format!("{}_", program.name)) {
                continue;
            }
            if let Some(unit) = program.units()?.into_iter().find(|u| u.id == id) {
                return Ok(Some(unit));
            }
        }
        Ok(None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    name: String,
    path: PathBuf,
}

impl Program {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mdp_dir(&self) -> PathBuf {
        self.path.join(MDP_DIR)
    }

    pub fn media_dir(&self) -> PathBuf {
        self.path.join(MEDIA_DIR)
    }

    pub fn output_dir(&self, config: &ContentManagerConfig) -> PathBuf {
        self.path.join(&config.build.output_dir)
    }

    pub fn pruned_dir(&self, config: &ContentManagerConfig) -> PathBuf {
        self.path.join(&config.media.pruned_dir)
    }

    /// Content units sorted by id.
    pub fn units(&self) -> io::Result<Vec<ContentUnit>> {
        let mdp_dir = self.mdp_dir();
        let mut units = Vec::new();
        for entry in WalkDir::new(&mdp_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != MDP_EXTENSION) {
                continue;
            }
            let Ok(relative) = path.strip_prefix(&mdp_dir) else {
                continue;
            };
            units.push(ContentUnit {
                id: content_id(&self.name, relative),
                program: self.name.clone(),
                path: path.to_path_buf(),
            });
        }
        units.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(units)
    }
}

/// A single `.mdp` source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUnit {
    id: String,
    program: String,
    path: PathBuf,
}

impl ContentUnit {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `p01` + `m01/intro.mdp` -> `p01_m01_intro`
pub fn content_id(program: &str, relative: &Path) -> String {
    let stem = relative.with_extension("");
    let mut id = program.to_string();
    for segment in stem.components() {
        id.push('_');
        id.push_str(&segment.as_os_str().to_string_lossy());
    }
    id
}

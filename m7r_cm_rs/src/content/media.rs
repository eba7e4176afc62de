//! Media resources and reference scanning.
//!
//! A media file counts as referenced when some content unit of the same
//! program mentions it: a token of the unit whose last `/` segment equals
//! the file name. That covers bare names (`a.png`), media-relative paths
//! (`img/a.png`) and longer relative links (`../media/img/a.png`).

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use super::program::Program;
use crate::config::ContentManagerConfig;

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_\-./]+").expect("token regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResource {
    program: String,
    relative: PathBuf,
    path: PathBuf,
}

impl MediaResource {
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Path relative to the program's `media/` directory.
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Media-relative path with `/` separators.
    pub fn relative_display(&self) -> String {
        self.relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn file_name(&self) -> String {
        self.relative
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Media resources of one program together with the names its units mention.
#[derive(Debug, Clone, Default)]
pub struct MediaIndex {
    resources: Vec<MediaResource>,
    mentioned: BTreeSet<String>,
}

impl MediaIndex {
    pub fn scan(program: &Program, config: &ContentManagerConfig) -> io::Result<Self> {
        let resources = media_resources(program, config)?;
        let mut mentioned = BTreeSet::new();
        for unit in program.units()? {
            let source = std::fs::read_to_string(unit.path())?;
            for token in TOKEN_REGEX.find_iter(&source) {
                let last = token.as_str().rsplit('/').next().unwrap_or_default();
                if !last.is_empty() {
                    mentioned.insert(last.to_string());
                }
            }
        }
        tracing::debug!(
            program = program.name(),
            resources = resources.len(),
            names = mentioned.len(),
            "media scanned"
        );
        Ok(Self {
            resources,
            mentioned,
        })
    }

    pub fn resources(&self) -> &[MediaResource] {
        &self.resources
    }

    pub fn is_referenced(&self, resource: &MediaResource) -> bool {
        self.mentioned.contains(&resource.file_name())
    }

    pub fn referenced(&self) -> impl Iterator<Item = &MediaResource> {
        self.resources.iter().filter(|r| self.is_referenced(r))
    }

    pub fn orphaned(&self) -> impl Iterator<Item = &MediaResource> {
        self.resources.iter().filter(|r| !self.is_referenced(r))
    }
}

/// Files below `<program>/media/`, sorted, minus ignored ones.
pub fn media_resources(
    program: &Program,
    config: &ContentManagerConfig,
) -> io::Result<Vec<MediaResource>> {
    let media_dir = program.media_dir();
    if !media_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut resources = Vec::new();
    for entry in WalkDir::new(&media_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&media_dir) else {
            continue;
        };
        if config.media.is_ignored(relative) {
            continue;
        }
        resources.push(MediaResource {
            program: program.name().to_string(),
            relative: relative.to_path_buf(),
            path: entry.path().to_path_buf(),
        });
    }
    Ok(resources)
}

/// A resource moved out of `media/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedResource {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Move every orphaned resource to `<program>/<pruned_dir>/<relative>`.
///
/// An earlier pruned file at the same place is kept; the newcomer gets the
/// first free name of the form `<stem>.<n>.<ext>`.
pub fn prune(program: &Program, config: &ContentManagerConfig) -> io::Result<Vec<PrunedResource>> {
    let index = MediaIndex::scan(program, config)?;
    let target_dir = program.pruned_dir(config);
    let mut pruned = Vec::new();
    for resource in index.orphaned() {
        let to = free_target(target_dir.join(resource.relative()));
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::rename(resource.path(), &to)?;
        tracing::debug!(from = %resource.path().display(), to = %to.display(), "pruned");
        pruned.push(PrunedResource {
            from: resource.path().to_path_buf(),
            to,
        });
    }
    Ok(pruned)
}

fn free_target(path: PathBuf) -> PathBuf {
    if !occupied(&path) {
        return path;
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let mut n = 1;
    loop {
        let candidate = path.with_file_name(format!("{stem}.{n}{extension}"));
        if !occupied(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

// Dangling symlinks count as occupied.
fn occupied(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRoot;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, body: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, body).expect("write");
    }

    fn fixture() -> (TempDir, Program) {
        let temp = TempDir::new().expect("temp dir");
        write(
            temp.path(),
            "docA/mdp/intro.mdp",
            "@img[img/used.png]\n@audio(../media/sound/voice.mp3)\n",
        );
        write(temp.path(), "docA/media/img/used.png", "png");
        write(temp.path(), "docA/media/img/unused.png", "png");
        write(temp.path(), "docA/media/sound/voice.mp3", "mp3");
        write(temp.path(), "docA/media/notes.tmp", "tmp");
        let program = ContentRoot::new(temp.path())
            .find_program("docA")
            .expect("lookup")
            .expect("docA");
        (temp, program)
    }

    fn names<'a>(resources: impl Iterator<Item = &'a MediaResource>) -> Vec<String> {
        resources.map(MediaResource::relative_display).collect()
    }

    #[test]
    fn test_referenced_and_orphaned() {
        let (_temp, program) = fixture();
        let index = MediaIndex::scan(&program, &ContentManagerConfig::default()).expect("scan");

        assert_eq!(
            names(index.referenced()),
            vec!["img/used.png", "sound/voice.mp3"]
        );
        assert_eq!(names(index.orphaned()), vec!["img/unused.png", "notes.tmp"]);
    }

    #[test]
    fn test_ignored_media_are_skipped() {
        let (temp, program) = fixture();
        write(temp.path(), ".m7r-cm/config.toml", "[media]\nignore = [\"*.tmp\"]\n");
        let config = ContentManagerConfig::load(temp.path()).expect("config");

        let resources = media_resources(&program, &config).expect("scan");
        assert_eq!(
            names(resources.iter()),
            vec!["img/unused.png", "img/used.png", "sound/voice.mp3"]
        );
    }

    #[test]
    fn test_program_without_media_dir() {
        let temp = TempDir::new().expect("temp dir");
        write(temp.path(), "p01/mdp/a.mdp", "text");
        let program = ContentRoot::new(temp.path())
            .find_program("p01")
            .expect("lookup")
            .expect("p01");
        let index = MediaIndex::scan(&program, &ContentManagerConfig::default()).expect("scan");
        assert!(index.resources().is_empty());
    }

    #[test]
    fn test_prune_moves_orphans_once() {
        let (temp, program) = fixture();
        let config = ContentManagerConfig::default();

        let pruned = prune(&program, &config).expect("prune");
        assert_eq!(pruned.len(), 2);
        assert!(temp.path().join("docA/media-pruned/img/unused.png").is_file());
        assert!(temp.path().join("docA/media-pruned/notes.tmp").is_file());
        assert!(!temp.path().join("docA/media/img/unused.png").exists());
        assert!(temp.path().join("docA/media/img/used.png").is_file());

        let again = prune(&program, &config).expect("prune again");
        assert!(again.is_empty());
    }

    #[test]
    fn test_prune_keeps_earlier_pruned_file() {
        let (temp, program) = fixture();
        let config = ContentManagerConfig::default();
        write(temp.path(), "docA/media-pruned/img/unused.png", "EARLIER");
        write(temp.path(), "docA/media-pruned/img/unused.1.png", "EARLIER-1");

        let pruned = prune(&program, &config).expect("prune");
        let moved = pruned
            .iter()
            .find(|p| p.from.ends_with("img/unused.png"))
            .expect("unused.png pruned");
        assert_eq!(
            moved.to,
            program.pruned_dir(&config).join("img/unused.2.png")
        );

        let read = |rel: &str| std::fs::read_to_string(temp.path().join(rel)).expect("read");
        assert_eq!(read("docA/media-pruned/img/unused.png"), "EARLIER");
        assert_eq!(read("docA/media-pruned/img/unused.1.png"), "EARLIER-1");
        assert_eq!(read("docA/media-pruned/img/unused.2.png"), "png");
        assert!(!temp.path().join("docA/media/img/unused.png").exists());
    }

    #[test]
    fn test_free_target_without_extension() {
        let temp = TempDir::new().expect("temp dir");
        write(temp.path(), "README", "x");
        assert_eq!(
            free_target(temp.path().join("README")),
            temp.path().join("README.1")
        );
        assert_eq!(
            free_target(temp.path().join("other")),
            temp.path().join("other")
        );
    }
}

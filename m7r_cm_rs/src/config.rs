//! Configuration file support for m7r-cm.
//!
//! Loads optional `.m7r-cm/config.toml` from the content root. A missing file
//! yields the defaults; a file that cannot be read or parsed is a
//! [`ConsistencyError`], since silently ignoring it would build or prune with
//! the wrong directories.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use crate::content::{MDP_DIR, MEDIA_DIR};
use crate::error::ConsistencyError;

/// Directory below the content root holding the config file.
pub const CONFIG_DIR: &str = ".m7r-cm";
pub const CONFIG_FILE: &str = "config.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ContentManagerConfig {
    pub build: BuildConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Per-program build output directory.
    pub output_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: "html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Per-program directory receiving pruned media.
    pub pruned_dir: String,
    /// Glob patterns (media-relative) excluded from media scans.
    pub ignore: Vec<String>,
    #[serde(skip)]
    ignore_set: GlobSet,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            pruned_dir: "media-pruned".to_string(),
            ignore: Vec::new(),
            ignore_set: GlobSet::empty(),
        }
    }
}

impl MediaConfig {
    /// True if the media-relative path matches an ignore pattern.
    pub fn is_ignored(&self, relative: &Path) -> bool {
        self.ignore_set.is_match(relative)
    }

    fn compile_ignore(&mut self) -> Result<(), String> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.ignore {
            let glob = Glob::new(pattern).map_err(|e| e.to_string())?;
            builder.add(glob);
        }
        self.ignore_set = builder.build().map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl ContentManagerConfig {
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load config from `.m7r-cm/config.toml` in the given content root.
    pub fn load(root: &Path) -> Result<Self, ConsistencyError> {
        Self::load_from_path(&Self::config_path(root))
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConsistencyError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let invalid = |message: String| ConsistencyError::InvalidConfig {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let mut config: Self = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        config.validate().map_err(invalid)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn validate(&mut self) -> Result<(), String> {
        let output_dir = program_dir_name("build.output_dir", &self.build.output_dir)?;
        let pruned_dir = program_dir_name("media.pruned_dir", &self.media.pruned_dir)?;
        if output_dir == pruned_dir {
            return Err(format!(
                "build.output_dir and media.pruned_dir must differ, both are '{}'",
                output_dir.to_string_lossy()
            ));
        }
        self.media.compile_ignore()
    }
}

/// A program-level directory must be one plain name next to `mdp/` and `media/`.
fn program_dir_name<'a>(key: &str, value: &'a str) -> Result<&'a OsStr, String> {
    let mut components = Path::new(value).components();
    let name = match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => name,
        _ => return Err(format!("{key} must be a single directory name, found '{value}'")),
    };
    if name == OsStr::new(MDP_DIR) || name == OsStr::new(MEDIA_DIR) {
        return Err(format!("{key} must not be the '{value}' directory"));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) {
        let dir = root.join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).expect("create config dir");
        let mut file = std::fs::File::create(dir.join(CONFIG_FILE)).expect("create config");
        writeln!(file, "{body}").expect("write config");
    }

    #[test]
    fn test_default_config() {
        let config = ContentManagerConfig::default();
        assert_eq!(config.build.output_dir, "html");
        assert_eq!(config.media.pruned_dir, "media-pruned");
        assert!(config.media.ignore.is_empty());
        assert!(!config.media.is_ignored(Path::new("img/a.png")));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let config = ContentManagerConfig::load(temp.path()).expect("defaults");
        assert_eq!(config.build.output_dir, "html");
    }

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().expect("temp dir");
        write_config(
            temp.path(),
            r#"
[build]
output_dir = "out"

[media]
pruned_dir = "attic"
ignore = [".DS_Store", "**/*.tmp"]
"#,
        );

        let config = ContentManagerConfig::load(temp.path()).expect("valid config");
        assert_eq!(config.build.output_dir, "out");
        assert_eq!(config.media.pruned_dir, "attic");
        assert!(config.media.is_ignored(Path::new(".DS_Store")));
        assert!(config.media.is_ignored(Path::new("video/cut.tmp")));
        assert!(!config.media.is_ignored(Path::new("video/cut.mp4")));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp = TempDir::new().expect("temp dir");
        write_config(temp.path(), "[media]\nignore = [\"*.bak\"]\n");

        let config = ContentManagerConfig::load(temp.path()).expect("valid config");
        assert_eq!(config.build.output_dir, "html");
        assert_eq!(config.media.pruned_dir, "media-pruned");
    }

    #[test]
    fn test_malformed_config_is_inconsistency() {
        let temp = TempDir::new().expect("temp dir");
        write_config(temp.path(), "[build\noutput_dir = ");

        let err = ContentManagerConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, ConsistencyError::InvalidConfig { .. }));
        assert!(err.to_string().starts_with("Invalid configuration file"));
    }

    #[test]
    fn test_invalid_glob_is_inconsistency() {
        let temp = TempDir::new().expect("temp dir");
        write_config(temp.path(), "[media]\nignore = [\"a[\"]\n");

        let err = ContentManagerConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, ConsistencyError::InvalidConfig { .. }));
    }

    #[test]
    fn test_empty_output_dir_rejected() {
        let temp = TempDir::new().expect("temp dir");
        write_config(temp.path(), "[build]\noutput_dir = \"\"\n");

        assert!(ContentManagerConfig::load(temp.path()).is_err());
    }

    fn load_dirs(
        output_dir: &str,
        pruned_dir: &str,
    ) -> Result<ContentManagerConfig, ConsistencyError> {
        let temp = TempDir::new().expect("temp dir");
        let body = format!(
            "[build]\noutput_dir = {output_dir:?}\n[media]\npruned_dir = {pruned_dir:?}\n"
        );
        write_config(temp.path(), &body);
        ContentManagerConfig::load(temp.path())
    }

    #[test]
    fn test_output_dir_must_be_plain_name() {
        for bad in ["mdp", "mdp/", "media", "..", ".", "/tmp/out", "out/html", "media-pruned"] {
            let result = load_dirs(bad, "media-pruned");
            assert!(
                matches!(result, Err(ConsistencyError::InvalidConfig { .. })),
                "output_dir '{bad}' must be rejected"
            );
        }
        assert!(load_dirs("public", "media-pruned").is_ok());
    }

    #[test]
    fn test_pruned_dir_must_be_plain_name() {
        for bad in ["media", "media/attic", "mdp", "html", "html/", "../attic", "/attic"] {
            let result = load_dirs("html", bad);
            assert!(
                matches!(result, Err(ConsistencyError::InvalidConfig { .. })),
                "pruned_dir '{bad}' must be rejected"
            );
        }
        assert!(load_dirs("html", "attic").is_ok());
    }

    #[test]
    fn test_rejection_names_the_key() {
        let err = load_dirs("mdp", "media-pruned").unwrap_err();
        assert!(err.to_string().contains("build.output_dir"));
    }
}

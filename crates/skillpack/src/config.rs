//! Build configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// File name of the artifact inside `out_dir`.
pub const ARTIFACT_FILE: &str = "skillpack.json";

/// Where a build reads its sources and writes its output.
///
/// Every field has a default, so an empty TOML file is a valid config.
/// Relative paths are resolved against the config file's directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Product name used when no manifest file exists.
    pub name: String,
    pub skills_dir: PathBuf,
    pub subagents_dir: PathBuf,
    pub when_to_use: PathBuf,
    pub manifest: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            name: "skillpack".to_string(),
            skills_dir: PathBuf::from("skills"),
            subagents_dir: PathBuf::from("agents"),
            when_to_use: PathBuf::from("docs/WHEN_TO_USE.md"),
            manifest: PathBuf::from("package.json"),
            out_dir: PathBuf::from("dist"),
        }
    }
}

impl BuildConfig {
    /// Default layout rooted at `root`.
    #[must_use]
    pub fn with_root(root: &Path) -> Self {
        Self::default().resolved_against(root)
    }

    /// Parse a TOML config without resolving paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TomlParse`] for invalid TOML or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML config file and resolve its paths against its directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::TomlParse`] if it is not a valid config.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let base = path.parent().unwrap_or(Path::new(""));
        Ok(Self::from_toml(&text)?.resolved_against(base))
    }

    /// Path of the bundle artifact.
    #[must_use]
    pub fn artifact_path(&self) -> PathBuf {
        self.out_dir.join(ARTIFACT_FILE)
    }

    fn resolved_against(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            name: self.name,
            skills_dir: resolve(self.skills_dir),
            subagents_dir: resolve(self.subagents_dir),
            when_to_use: resolve(self.when_to_use),
            manifest: resolve(self.manifest),
            out_dir: resolve(self.out_dir),
        }
    }
}

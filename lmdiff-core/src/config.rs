//! Optional per-repository settings.
//!
//! Settings are read from `.lmdiff.toml` in the repository root, or from an
//! explicit file. Command line flags override anything set here.

use crate::error::Result;
use crate::models::RevisionRef;
use crate::walker::DEFAULT_METADATA_DIR;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".lmdiff.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub reference: RevisionRef,
    pub include_untracked: bool,
    pub metadata_dir: String,
    /// Replaces the review instructions placed in the prompt description.
    pub instructions: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference: RevisionRef::default(),
            include_untracked: true,
            metadata_dir: DEFAULT_METADATA_DIR.to_string(),
            instructions: None,
        }
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads an explicitly requested config file. A missing file is an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Loads `.lmdiff.toml` from `repo_root`, falling back to defaults when the
    /// file does not exist.
    pub fn discover<P: AsRef<Path>>(repo_root: P) -> Result<Self> {
        let path = config_path(repo_root);
        if !path.exists() {
            return Ok(Self::default());
        }
        debug!("loading config from {}", path.display());
        Self::from_file(&path)
    }
}

pub fn config_path<P: AsRef<Path>>(repo_root: P) -> PathBuf {
    repo_root.as_ref().join(CONFIG_FILE_NAME)
}

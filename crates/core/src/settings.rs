//! Settings file support.
//!
//! Settings live in a YAML file, `~/.proofread.yaml` unless another path is
//! given. Every key is optional; command line flags take precedence over the
//! file and the file over built-in defaults.
//!
//! ```yaml
//! api-url: http://localhost:8081
//! language: en-US
//! mother-tongue: pt-BR
//! log-level: info
//! ignore-words: [blogc, rustc]
//! disable-rules: [WHITESPACE_RULE]
//! disable-categories: [TYPOGRAPHY]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{ProofreadError, Result};

/// File name looked up in the home directory.
pub const SETTINGS_FILE_NAME: &str = ".proofread.yaml";

/// Values read from a settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    pub api_url: Option<String>,
    pub language: Option<String>,
    pub mother_tongue: Option<String>,
    pub log_level: Option<String>,
    /// Path or name of the blogc binary.
    pub blogc: Option<PathBuf>,
    pub ignore_words: Vec<String>,
    pub disable_rules: Vec<String>,
    pub disable_categories: Vec<String>,
    pub dump_html: Option<bool>,
    pub dump_text: Option<bool>,
}

/// Where a [`Settings`] value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    File(PathBuf),
    Defaults,
}

impl Settings {
    /// Parses settings from YAML text. An empty document yields defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads settings from an explicit path, which must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ProofreadError::ConfigError(format!("settings file not found: {}", path.display())));
        }

        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml).map_err(|e| match e {
            ProofreadError::ConfigError(msg) => ProofreadError::ConfigError(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Loads `path` when given, otherwise the home directory file if present.
    ///
    /// A missing default file is not an error; defaults are used instead.
    pub fn discover(path: Option<&Path>) -> Result<(Self, SettingsSource)> {
        if let Some(path) = path {
            return Ok((Self::load(path)?, SettingsSource::File(path.to_path_buf())));
        }

        match default_path() {
            Some(path) if path.is_file() => {
                let settings = Self::load(&path)?;
                Ok((settings, SettingsSource::File(path)))
            }
            _ => Ok((Self::default(), SettingsSource::Defaults)),
        }
    }
}

/// `~/.proofread.yaml`, when a home directory is known.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SETTINGS_FILE_NAME))
}

/// Merges a list from the settings file with one from the command line.
///
/// Entries are trimmed, empty entries dropped and duplicates removed, keeping
/// settings entries first and the order of first appearance.
pub fn merge_lists(from_settings: &[String], from_cli: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();

    for entry in from_settings.iter().chain(from_cli) {
        let entry = entry.trim();
        if !entry.is_empty() && !merged.iter().any(|m| m == entry) {
            merged.push(entry.to_string());
        }
    }

    merged
}

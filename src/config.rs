//! Simulator and loader configuration, read from a TOML file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    /// Directory scanned recursively for quest TOML files
    pub definitions_dir: PathBuf,
    /// Default tracing directive, overridden by RUST_LOG
    pub log_filter: String,
    /// Fail loading when a prerequisite names an unknown quest
    pub strict_prerequisites: bool,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            definitions_dir: PathBuf::from("data/quests"),
            log_filter: "quest_tracker=info".to_string(),
            strict_prerequisites: false,
        }
    }
}

impl QuestConfig {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, String> {
        match Self::read(path)? {
            Some(config) => Ok(config),
            None => {
                warn!("Config file {:?} not found, using defaults", path);
                Ok(Self::default())
            }
        }
    }

    /// Read `path` without logging; `None` when the file does not exist.
    /// Lets the caller set up tracing from the result before reporting.
    pub fn read(path: &Path) -> Result<Option<Self>, String> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        Self::from_toml(&content)
            .map(Some)
            .map_err(|e| format!("Failed to parse {:?}: {}", path, e))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

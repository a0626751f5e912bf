use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration from diary.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiaryConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub autosave: AutosaveConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one encrypted file per entry
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("diary_entries")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Quiet period (milliseconds) before a burst of edits is saved
    #[serde(default = "default_quiet_ms")]
    pub quiet_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        AutosaveConfig {
            quiet_ms: default_quiet_ms(),
        }
    }
}

fn default_quiet_ms() -> u64 {
    2000
}

impl DiaryConfig {
    /// Read a diary.toml. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<DiaryConfig, toml::de::Error> {
        match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text),
            Err(_) => Ok(DiaryConfig::default()),
        }
    }
}

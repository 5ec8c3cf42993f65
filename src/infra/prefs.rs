//! File-backed preference store.
//!
//! A single TOML document holding the last committed search query.
//! A corrupt or unreadable file decodes to the default: the value is
//! treated as lost, logged, and never surfaced as an error.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default)]
    pub search_query: String,
}

/// Durable single-key scalar store for user preferences.
pub struct PreferenceFile {
    path: PathBuf,
}

impl PreferenceFile {
    /// Use the default on-disk location.
    pub fn open() -> Self {
        Self::at(Self::default_path())
    }

    /// Use a specific backing file.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("FLIGHTSEARCH_PREFS_PATH") {
            return PathBuf::from(path);
        }
        crate::infra::data_dir().join("prefs.toml")
    }

    /// Current preferences; missing or corrupt files yield the default.
    pub fn load(&self) -> Preferences {
        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return Preferences::default();
        };
        match toml::from_str(&contents) {
            Ok(prefs) => prefs,
            Err(err) => {
                log::warn!(
                    "preference file {} is corrupt, resetting to defaults: {}",
                    self.path.display(),
                    err
                );
                Preferences::default()
            }
        }
    }

    /// Durably overwrite the stored preferences. Idempotent.
    pub fn store(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(prefs)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

//! Locally persisted client settings.
//!
//! The bearer credential is the only durable state; entry history is always
//! re-fetched. A custom reminder schedule may be stored next to it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client_error::SettingsError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Bearer credential sent with submissions
    #[serde(default)]
    pub key: String,
    /// Local hours (0-23) to be reminded at; `None` uses the default schedule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_hours: Option<Vec<u32>>,
}

impl Settings {
    /// Load settings, treating a missing file as defaults.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!("No settings file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write settings through a temporary file in the same directory so a
    /// crash never leaves a truncated file behind.
    #[instrument(skip(self))]
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        file.persist(path).map_err(|e| SettingsError::Io(e.error))?;
        debug!("Settings saved");
        Ok(())
    }
}

/// `$HOME/.config/road-noise/settings.json`, or `./settings.json` without a home.
pub fn default_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".config")
            .join("road-noise")
            .join("settings.json"),
        None => PathBuf::from("settings.json"),
    }
}

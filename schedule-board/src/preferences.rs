//! Persisted user preferences.
//!
//! The only preference is the dark-mode flag. It lives in a small JSON file
//! so it survives restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Errors from writing preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// Filesystem operation failed
    #[error("preference file {path}: {message}")]
    Io { path: String, message: String },

    /// Failed to serialize preferences
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Disk-backed preference store.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored preferences.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load(&self) -> Preferences {
        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return Preferences::default();
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            debug!(path = %self.path.display(), error = %e, "ignoring corrupt preferences");
            Preferences::default()
        })
    }

    /// Persist the dark-mode flag.
    pub fn set_dark_mode(&self, dark_mode: bool) -> Result<Preferences, PreferenceError> {
        let preferences = Preferences { dark_mode };
        self.save(&preferences)?;
        Ok(preferences)
    }

    /// Write `preferences`, creating parent directories if needed.
    pub fn save(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(preferences)?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), dark_mode = preferences.dark_mode, "preferences saved");
        Ok(())
    }

    fn io_error(&self, e: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

//! Persisted user preferences
//!
//! Remembers the last kubeconfig that initialized successfully so later runs
//! can start without `--kubeconfig`. Stored as TOML in
//! `~/.kubelens/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const PREFERENCES_DIR: &str = ".kubelens";
const PREFERENCES_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Last kubeconfig path that loaded without error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,
}

/// Preference file on disk
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store under the user's home directory, if one is known
    pub fn default_location() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::at(home.join(PREFERENCES_DIR).join(PREFERENCES_FILE)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences; a missing or unparseable file yields the defaults
    pub fn load(&self) -> Preferences {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Preferences::default();
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::debug!(
                path = %self.path.display(),
                error = %e,
                "ignoring invalid preferences"
            );
            Preferences::default()
        })
    }

    /// Write preferences, replacing whatever the file held
    pub fn save(&self, preferences: &Preferences) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(preferences).map_err(io::Error::other)?;
        fs::write(&self.path, content)
    }

    pub fn kubeconfig(&self) -> Option<PathBuf> {
        self.load().kubeconfig
    }

    /// Remember `path` as the kubeconfig to use next time
    pub fn remember_kubeconfig(&self, path: &Path) -> io::Result<()> {
        let mut preferences = self.load();
        if preferences.kubeconfig.as_deref() == Some(path) {
            return Ok(());
        }
        preferences.kubeconfig = Some(path.to_path_buf());
        self.save(&preferences)
    }

    /// Drop the remembered kubeconfig
    pub fn forget_kubeconfig(&self) -> io::Result<()> {
        let mut preferences = self.load();
        preferences.kubeconfig = None;
        self.save(&preferences)
    }
}

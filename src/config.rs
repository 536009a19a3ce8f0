//! Configuration handling for form rendering

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for rendered forms
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FormsConfig {
    /// Submit button label
    pub submit_label: Option<String>,
    /// Cancel button label
    pub cancel_label: Option<String>,
    /// Appended to the label of required fields
    pub required_marker: Option<String>,
    /// Re-validate a field as soon as it is edited
    pub live_validation: Option<bool>,
}

impl FormsConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "tui-forms", "tui-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config file, defaults if absent
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FormsConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded forms config");
        Ok(config)
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn submit_label(&self) -> &str {
        self.submit_label.as_deref().unwrap_or("Submit")
    }

    pub fn cancel_label(&self) -> &str {
        self.cancel_label.as_deref().unwrap_or("Cancel")
    }

    pub fn required_marker(&self) -> &str {
        self.required_marker.as_deref().unwrap_or("*")
    }

    pub fn live_validation(&self) -> bool {
        self.live_validation.unwrap_or(true)
    }
}

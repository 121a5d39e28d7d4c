//! Configuration persistence
//!
//! Stores user preferences in `~/.config/proofread/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::correction::ClientSettings;
use crate::surface::{SurfaceMode, SurfaceProps};

pub const DEFAULT_PLACEHOLDER: &str = "Enter some text...";

/// Configuration that persists across runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofreadConfig {
    /// Where and how to reach the correction service
    #[serde(default)]
    pub service: ClientSettings,
    /// Shown while the field is empty
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default)]
    pub mode: SurfaceMode,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

impl Default for ProofreadConfig {
    fn default() -> Self {
        Self {
            service: ClientSettings::default(),
            placeholder: default_placeholder(),
            mode: SurfaceMode::default(),
        }
    }
}

impl ProofreadConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path; missing or invalid files give defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Surface props for the content field
    pub fn surface_props(&self) -> SurfaceProps {
        SurfaceProps::new(self.mode).with_placeholder(self.placeholder.clone())
    }
}

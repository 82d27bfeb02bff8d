//! Paste cycle configuration
//!
//! Stored in `~/.config/paste-cycle/config.yaml`. Every field has a default,
//! and a missing or unreadable file yields the defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_MAX_ENTRIES;

/// User-facing options of the paste cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteCycleConfig {
    /// Number of history entries to remember (at least 1)
    #[serde(default = "default_max")]
    pub max: usize,

    /// Briefly highlight text inserted by a cycle step
    #[serde(default = "default_true")]
    pub flash_on_paste: bool,

    /// Leave pasted text selected instead of placing the cursor after it
    #[serde(default)]
    pub select_pasted: bool,

    /// With several cursors, fall back to the ordinary paste
    #[serde(default = "default_true")]
    pub normal_paste_with_multiple_cursors: bool,

    /// Re-indent multi-line pastes to the insertion line
    #[serde(default)]
    pub auto_indent_on_paste: bool,

    /// How long the paste highlight stays visible
    #[serde(default = "default_flash_duration_ms")]
    pub flash_duration_ms: u64,
}

fn default_max() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_true() -> bool {
    true
}

fn default_flash_duration_ms() -> u64 {
    1000
}

impl Default for PasteCycleConfig {
    fn default() -> Self {
        Self {
            max: default_max(),
            flash_on_paste: true,
            select_pasted: false,
            normal_paste_with_multiple_cursors: true,
            auto_indent_on_paste: false,
            flash_duration_ms: default_flash_duration_ms(),
        }
    }
}

impl PasteCycleConfig {
    /// History capacity, never below 1
    pub fn capacity(&self) -> usize {
        self.max.max(1)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }

    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; any failure falls back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
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

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating the parent directory if needed
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PasteCycleConfig::default();
        assert_eq!(config.max, 10);
        assert!(config.flash_on_paste);
        assert!(!config.select_pasted);
        assert!(config.normal_paste_with_multiple_cursors);
        assert_eq!(config.flash_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: PasteCycleConfig = serde_yaml::from_str("max: 3\nselect_pasted: true\n").unwrap();
        assert_eq!(config.max, 3);
        assert!(config.select_pasted);
        assert!(config.flash_on_paste);
    }

    #[test]
    fn test_capacity_never_zero() {
        let config = PasteCycleConfig {
            max: 0,
            ..PasteCycleConfig::default()
        };
        assert_eq!(config.capacity(), 1);
    }
}

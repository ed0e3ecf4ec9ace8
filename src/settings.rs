//! Engine settings persistence
//!
//! Stores dispatcher tunables in `~/.config/helix-keys/settings.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::keymap::{DispatchOptions, Mode};

/// Settings that shape how keys are dispatched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Digits inside a sub-menu extend the repeat count instead of being chords
    pub repeat_in_submenu: bool,
    /// Select mode accepts a repeat count like Normal mode
    pub count_in_select: bool,
    /// Largest repeat count a command will run with
    pub max_repeat: usize,
    /// Layer the user keymap over the built-in Helix bindings
    pub inherit_defaults: bool,
    pub initial_mode: Mode,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            repeat_in_submenu: false,
            count_in_select: false,
            max_repeat: 10_000,
            inherit_defaults: false,
            initial_mode: Mode::Normal,
        }
    }
}

impl EngineSettings {
    /// Load settings from the user config dir, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::settings_file() else {
            tracing::debug!("No config directory available, using default settings");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`; a missing or malformed file gives defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings to {}: {}", path.display(), e))?;

        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            repeat_in_submenu: self.repeat_in_submenu,
            count_in_select: self.count_in_select,
            max_repeat: self.max_repeat.max(1),
        }
    }
}

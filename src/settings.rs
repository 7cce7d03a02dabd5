use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ui::theme;

/// Persisted user settings (lives in the OS config directory).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Board zoom: pixels per hour.
    pub hour_width: f32,
    /// Last dataset file, reopened on the next start.
    pub last_file: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            hour_width: theme::DEFAULT_HOUR_WIDTH,
            last_file: None,
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "RustRotaApp")
        .map(|dirs| dirs.config_dir().join("settings.json"))
}

impl AppSettings {
    /// Load persisted settings, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = settings_path() else {
            return Self::default();
        };
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Best-effort save; a failure only costs the preference.
    pub fn save(&self) {
        let Some(path) = settings_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    log::warn!("failed to save settings to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("failed to serialize settings: {}", e),
        }
    }

    /// The settings folder, for Help → Open Config Folder.
    pub fn config_dir(&self) -> Option<PathBuf> {
        settings_path().and_then(|p| p.parent().map(|d| d.to_path_buf()))
    }
}

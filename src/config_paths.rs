//! Centralized configuration paths for helix-keys
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/helix-keys/`
//! - Windows: `%APPDATA%\helix-keys\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "helix-keys";

/// Log file prefix; the daily appender adds `.YYYY-MM-DD`
pub const LOG_FILE_NAME: &str = "helix-keys.log";

/// Base config directory for helix-keys
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/helix-keys`
///   - Else: `~/.config/helix-keys`
///
/// Windows:
///   - `%APPDATA%\helix-keys`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// The user keymap: `keys.toml`, or `keys.yaml`/`keys.yml` when only that exists
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| keymap_file_in(&dir))
}

/// Pick the keymap file inside `dir`, preferring TOML
pub fn keymap_file_in(dir: &Path) -> PathBuf {
    let toml = dir.join("keys.toml");
    if toml.exists() {
        return toml;
    }
    ["keys.yaml", "keys.yml"]
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
        .unwrap_or(toml)
}

/// `~/.config/helix-keys/settings.yaml`
pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.yaml"))
}

/// `~/.config/helix-keys/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Returns the most recent log file in `~/.config/helix-keys/logs/`
/// (e.g., `helix-keys.log.2026-01-07`)
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;

    let mut log_files: Vec<PathBuf> = fs::read_dir(&logs_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_NAME))
        })
        .collect();

    // YYYY-MM-DD sorts naturally
    log_files.sort_by(|a, b| b.cmp(a));

    log_files
        .into_iter()
        .next()
        .or_else(|| Some(logs_dir.join(LOG_FILE_NAME)))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let config = ensure_config_dir()?;
    let logs = config.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}

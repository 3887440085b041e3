//! File-backed settings storage
//!
//! Writes go to a sibling `.tmp` file first and are renamed into place, so a
//! crash mid-write never leaves a truncated settings document behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::settings::{Settings, SettingsError};

/// Read and parse a settings document
pub fn try_load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let json = fs::read_to_string(path)?;
    Settings::try_import_json(&json)
}

/// Load settings, falling back to defaults on any failure
pub fn load_settings(path: &Path) -> Settings {
    match try_load_settings(path) {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path.display());
            settings
        }
        Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No settings at {}, using defaults", path.display());
            Settings::default()
        }
        Err(e) => {
            log::warn!("Failed to load {}: {e}; using defaults", path.display());
            Settings::default()
        }
    }
}

/// Save settings atomically
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let json = settings.export_json()?;
    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    log::info!("Settings saved to {}", path.display());
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

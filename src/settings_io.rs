//! Settings and profile persistence
//!
//! Settings live in `<config>/CaptureTarget/settings.json`; profiles are one
//! JSON file each under `Profiles/`. Reads are lenient (missing keys take
//! defaults, unreadable files are skipped), writes go through pretty JSON.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::config::{env, files};
use crate::logging::LogLevel;
use crate::profile::Profile;
use crate::settings::Settings;

pub fn app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(files::APP_DIR_NAME))
}

pub fn profiles_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(files::PROFILES_DIR)
}

fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_obj), Value::Object(overlay_obj)) => {
            for (k, v) in overlay_obj {
                match base_obj.get_mut(&k) {
                    Some(existing) => merge_json(existing, v),
                    None => {
                        base_obj.insert(k, v);
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value;
        }
    }
}

fn read_json_object(path: &Path) -> Value {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        .filter(Value::is_object)
        .unwrap_or_else(|| serde_json::json!({}))
}

/// Apply a log level override (normally the value of `CAPTURE_TARGET_LOG`).
/// Values that do not parse as a level are ignored.
pub fn apply_log_level_override(settings: &mut Settings, value: Option<String>) {
    let Some(raw) = value else {
        return;
    };
    match raw.parse::<LogLevel>() {
        Ok(level) => settings.log_level = level.to_string(),
        Err(e) => log::warn!("Ignoring {}: {}", env::LOG_LEVEL_ENV, e),
    }
}

/// Load settings from `config_dir`, merged over defaults, then apply the
/// environment override. The normalized file is written back.
pub fn load_settings(config_dir: &Path) -> Settings {
    let settings_path = config_dir.join(files::SETTINGS_FILE);
    let on_disk = read_json_object(&settings_path);

    let mut merged =
        serde_json::to_value(Settings::default()).unwrap_or_else(|_| serde_json::json!({}));
    merge_json(&mut merged, on_disk);

    let mut settings: Settings = serde_json::from_value(merged).unwrap_or_default();

    if let Err(e) = persist_settings(config_dir, &settings) {
        log::warn!("Failed to persist normalized settings: {:#}", e);
    }

    apply_log_level_override(&mut settings, std::env::var(env::LOG_LEVEL_ENV).ok());
    settings
}

pub fn persist_settings(config_dir: &Path, settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
    let settings_path = config_dir.join(files::SETTINGS_FILE);

    // Keep keys written by newer versions that this one does not know.
    let mut existing = read_json_object(&settings_path);
    let new_value = serde_json::to_value(settings).context("Failed to serialize settings")?;
    merge_json(&mut existing, new_value);
    if settings.active_profile.is_none() {
        if let Value::Object(obj) = &mut existing {
            obj.remove("active_profile");
        }
    }

    let pretty = serde_json::to_string_pretty(&existing)?;
    std::fs::write(&settings_path, pretty)
        .with_context(|| format!("Failed to write {:?}", settings_path))?;
    Ok(())
}

/// File name for a profile: anything outside `[A-Za-z0-9_-]` becomes `_`.
pub fn profile_file_name(profile_name: &str) -> String {
    let stem: String = profile_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if stem.is_empty() { "profile".to_string() } else { stem };
    format!("{}.json", stem)
}

pub fn save_profile(config_dir: &Path, profile: &Profile) -> Result<PathBuf> {
    let dir = profiles_dir(config_dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create profiles directory: {:?}", dir))?;

    let path = dir.join(profile_file_name(&profile.name));
    let pretty = serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;
    std::fs::write(&path, pretty).with_context(|| format!("Failed to write {:?}", path))?;
    log::debug!("Saved profile '{}' to {}", profile.name, path.display());
    Ok(path)
}

pub fn load_profile(config_dir: &Path, profile_name: &str) -> Result<Profile> {
    let path = profiles_dir(config_dir).join(profile_file_name(profile_name));
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read profile {:?}", path))?;
    let profile: Profile = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid profile JSON in {:?}", path))?;
    Ok(profile)
}

/// Names of the profiles stored under `config_dir`, sorted. Files that are
/// not valid profile JSON are skipped.
pub fn list_profiles(config_dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(profiles_dir(config_dir)) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .filter_map(|path| {
            let raw = std::fs::read_to_string(&path).ok()?;
            let profile: Profile = serde_json::from_str(&raw).ok()?;
            Some(profile.name)
        })
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_file_name_replaces_unsafe_characters() {
        assert_eq!(profile_file_name("Game Stream"), "Game_Stream.json");
        assert_eq!(profile_file_name("../etc"), "___etc.json");
        assert_eq!(profile_file_name(""), "profile.json");
    }

    #[test]
    fn log_level_override_accepts_known_levels() {
        let mut settings = Settings::default();
        apply_log_level_override(&mut settings, Some("TRACE".to_string()));
        assert_eq!(settings.log_level(), LogLevel::Trace);
    }

    #[test]
    fn log_level_override_ignores_garbage() {
        let mut settings = Settings::default();
        apply_log_level_override(&mut settings, Some("loud".to_string()));
        assert_eq!(settings.log_level(), LogLevel::Info);
        apply_log_level_override(&mut settings, None);
        assert_eq!(settings.log_level(), LogLevel::Info);
    }

    #[test]
    fn merge_json_overlays_nested_objects() {
        let mut base = serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3});
        merge_json(&mut base, serde_json::json!({"a": {"b": 9}}));
        assert_eq!(base, serde_json::json!({"a": {"b": 9, "c": 2}, "d": 3}));
    }
}

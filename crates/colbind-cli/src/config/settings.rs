use std::path::Path;

use colbind_check::CheckSettings;

use super::atomic::write_bytes_atomic;
use super::ConfigResult;

/// Settings file looked up in the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "colbind.toml";

/// Read settings from `path`, falling back to defaults when the file is absent.
pub fn load_settings(path: &Path) -> ConfigResult<CheckSettings> {
    if !path.exists() {
        tracing::debug!(event = "settings_defaulted", path = %path.display());
        return Ok(CheckSettings::default());
    }

    let content = std::fs::read_to_string(path)?;
    let settings: CheckSettings = toml::from_str(&content)?;
    Ok(settings)
}

pub fn load_or_create_settings(path: &Path) -> ConfigResult<CheckSettings> {
    if path.exists() {
        return load_settings(path);
    }

    let settings = CheckSettings::default();
    save_settings(path, &settings)?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &CheckSettings) -> ConfigResult<()> {
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(path, encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("colbind-settings-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = scratch_dir().join("colbind.toml");
        let settings = load_settings(&path).expect("load settings");
        assert_eq!(settings, CheckSettings::default());
        assert!(!path.exists());
    }

    #[test]
    fn created_settings_round_trip() {
        let dir = scratch_dir();
        let path = dir.join("colbind.toml");

        let created = load_or_create_settings(&path).expect("create settings");
        assert!(path.exists());
        assert_eq!(load_settings(&path).expect("reload"), created);

        std::fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = scratch_dir();
        let path = dir.join("colbind.toml");
        write_bytes_atomic(&path, b"base_type = \"Record\"\ndeny_warnings = true\n")
            .expect("write settings");

        let settings = load_settings(&path).expect("load settings");
        assert_eq!(settings.base_type, "Record");
        assert!(settings.deny_warnings);
        assert_eq!(settings.column_type, CheckSettings::default().column_type);

        std::fs::remove_dir_all(dir).expect("cleanup");
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_FOLDER_NAME: &str = "DevAI";

/// Simulated backend latency, in milliseconds. The mock has no network,
/// so these delays are what makes spinners and loading states visible.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LatencyConfig {
    pub sign_in_ms: u64,
    pub analytics_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            sign_in_ms: 1000,
            analytics_ms: 500,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UiSettings {
    #[serde(default)]
    pub last_theme: Option<String>,
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Settings {
    pub version: String,
    pub base_path: String,
    pub mode: String,
    #[serde(default)]
    pub latency: LatencyConfig,
    #[serde(default)]
    pub ui: UiSettings,
}

pub fn default_base_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));

    if let Some(dir) = exe_dir {
        return dir.join("data");
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_FOLDER_NAME)
}

pub fn ensure_base_folders(base: &Path) -> io::Result<()> {
    let dirs = [
        base.to_path_buf(),
        base.join("config"),
        base.join("logs"),
        base.join("themes"),
    ];

    for d in dirs {
        if !d.exists() {
            fs::create_dir_all(&d)?;
        }
    }

    Ok(())
}

pub fn settings_path(base: &Path) -> PathBuf {
    base.join("config").join("settings.json")
}

pub fn load_or_init_settings(base: &Path) -> io::Result<Settings> {
    let config_path = settings_path(base);

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("JSON parse error: {e}")))?;

        // Keep base_path in sync when the app is launched against a
        // different data directory than last time.
        if settings.base_path != base.to_string_lossy() {
            settings.base_path = base.to_string_lossy().to_string();
        }
        return Ok(settings);
    }

    let settings = Settings {
        version: env!("CARGO_PKG_VERSION").to_string(),
        base_path: base.to_string_lossy().to_string(),
        mode: "gui".to_string(),
        latency: LatencyConfig::default(),
        ui: UiSettings::default(),
    };

    let json = serde_json::to_string_pretty(&settings)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("JSON encode error: {e}")))?;
    fs::write(&config_path, json)?;

    Ok(settings)
}

pub fn save_settings(settings: &Settings, base: &Path) -> io::Result<()> {
    let config_path = settings_path(base);
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("JSON encode error: {e}")))?;
    fs::write(&config_path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn given_fresh_base_then_defaults_are_written_to_disk() {
        let dir = tempdir().unwrap();
        ensure_base_folders(dir.path()).unwrap();

        let settings = load_or_init_settings(dir.path()).unwrap();
        assert_eq!(settings.mode, "gui");
        assert_eq!(settings.latency.sign_in_ms, 1000);
        assert_eq!(settings.latency.analytics_ms, 500);
        assert!(settings.ui.last_theme.is_none());
        assert!(settings_path(dir.path()).exists());
    }

    #[test]
    fn given_saved_settings_then_theme_choice_survives_a_reload() {
        let dir = tempdir().unwrap();
        ensure_base_folders(dir.path()).unwrap();

        let mut settings = load_or_init_settings(dir.path()).unwrap();
        settings.ui.last_theme = Some("devai_light".to_string());
        save_settings(&settings, dir.path()).unwrap();

        let reloaded = load_or_init_settings(dir.path()).unwrap();
        assert_eq!(reloaded.ui.last_theme.as_deref(), Some("devai_light"));
    }

    #[test]
    fn given_partial_settings_file_then_missing_sections_use_defaults() {
        let dir = tempdir().unwrap();
        ensure_base_folders(dir.path()).unwrap();
        let stub = r#"{"version":"0.0.1","base_path":"old","mode":"cli"}"#;
        fs::write(settings_path(dir.path()), stub).unwrap();

        let settings = load_or_init_settings(dir.path()).unwrap();
        assert_eq!(settings.mode, "cli");
        assert_eq!(settings.latency.sign_in_ms, 1000);
        // The stale base_path is replaced with the one actually in use.
        assert_eq!(settings.base_path, dir.path().to_string_lossy());
    }
}

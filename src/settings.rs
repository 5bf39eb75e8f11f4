//! Demo settings
//!
//! Settings are read from `~/.config/vantage/settings.toml`, camera profiles
//! from `~/.config/vantage/camera.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vantage_camera::{CameraConstants, ControllerConfig, DEFAULT_SETTING_KEY};
use vantage_core::ClockConfig;

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub controller: ControllerConfig,
    pub clock: ClockConfig,
    pub demo: DemoSettings,
}

impl AppSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vantage"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Get the camera profile file path
    pub fn camera_profiles_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("camera.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }
}

/// Scripted demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Camera profile selected at startup
    pub initial_setting: String,
    /// Length of the scripted run in seconds
    pub duration: f32,
    /// Seed for the shaker; random when unset
    pub shake_seed: Option<u64>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            initial_setting: DEFAULT_SETTING_KEY.to_string(),
            duration: 16.0,
            shake_seed: None,
        }
    }
}

/// Load camera profiles from `path`, or the config directory when not given.
///
/// Falls back to the built-in profile when the file is missing or malformed.
pub fn load_camera_profiles(path: Option<&Path>) -> CameraConstants {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match AppSettings::camera_profiles_path() {
            Some(path) if path.exists() => path,
            _ => {
                info!("No camera profile file found, using built-in profile");
                return CameraConstants::default();
            }
        },
    };

    match CameraConstants::load(&path) {
        Ok(constants) if !constants.is_empty() => constants,
        Ok(_) => {
            warn!("{:?} defines no camera profiles, using built-in profile", path);
            CameraConstants::default()
        }
        Err(e) => {
            warn!("{}, using built-in profile", e);
            CameraConstants::default()
        }
    }
}

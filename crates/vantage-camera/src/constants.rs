//! Registry of camera profiles with deterministic fallback lookup

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::CameraError;
use crate::setting::{CameraSetting, DEFAULT_SETTING_KEY};

/// Read-only lookup the controller resolves profiles through.
pub trait SettingsStore {
    /// Resolve a profile by key, applying whatever fallback the store defines.
    fn resolve(&self, key: &str) -> Option<Arc<CameraSetting>>;
}

/// On-disk shape of a settings file
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    settings: Vec<CameraSetting>,
}

/// Ordered collection of camera profiles.
///
/// Lookup order: exact key, then `"Default"`, then the first entry. Keys are not
/// required to be unique; the first match wins.
#[derive(Debug, Clone)]
pub struct CameraConstants {
    settings: Vec<Arc<CameraSetting>>,
}

impl Default for CameraConstants {
    fn default() -> Self {
        Self::new(vec![CameraSetting::default()])
    }
}

impl CameraConstants {
    pub fn new(settings: Vec<CameraSetting>) -> Self {
        Self {
            settings: settings.into_iter().map(Arc::new).collect(),
        }
    }

    /// An empty registry; every lookup returns `None`
    pub fn empty() -> Self {
        Self {
            settings: Vec::new(),
        }
    }

    /// Parse a TOML document containing `[[settings]]` tables
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: SettingsFile = toml::from_str(content)?;
        Ok(Self::new(file.settings))
    }

    /// Load profiles from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CameraError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| CameraError::ConfigRead(path.to_path_buf(), e))?;
        let constants = Self::from_toml_str(&content)
            .map_err(|e| CameraError::ConfigParse(path.to_path_buf(), e.to_string()))?;
        info!(
            "Loaded {} camera settings from {:?}",
            constants.len(),
            path
        );
        Ok(constants)
    }

    /// Serialize the registry back to TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let file = SettingsFile {
            settings: self.settings.iter().map(|s| (**s).clone()).collect(),
        };
        toml::to_string_pretty(&file)
    }

    /// Append a profile (lookup order follows insertion order)
    pub fn push(&mut self, setting: CameraSetting) {
        self.settings.push(Arc::new(setting));
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CameraSetting> {
        self.settings.iter().map(|s| s.as_ref())
    }

    fn find(&self, key: &str) -> Option<&Arc<CameraSetting>> {
        self.settings.iter().find(|s| s.key_name == key)
    }

    /// Look up a profile by key, falling back to `"Default"` and then the first entry.
    pub fn get_setting(&self, key: &str) -> Option<&Arc<CameraSetting>> {
        if let Some(setting) = self.find(key) {
            debug!("Resolved camera setting '{}'", key);
            return Some(setting);
        }

        if key != DEFAULT_SETTING_KEY {
            if let Some(setting) = self.find(DEFAULT_SETTING_KEY) {
                warn!(
                    "Camera setting '{}' not found, falling back to '{}'",
                    key, DEFAULT_SETTING_KEY
                );
                return Some(setting);
            }
        }

        match self.settings.first() {
            Some(first) => {
                error!(
                    "Neither '{}' nor '{}' camera setting exists, using first entry '{}'",
                    key, DEFAULT_SETTING_KEY, first.key_name
                );
                Some(first)
            }
            None => {
                error!("No camera settings defined, cannot resolve '{}'", key);
                None
            }
        }
    }

    /// Look up the `"Default"` profile, falling back to the first entry.
    pub fn get_default_setting(&self) -> Option<&Arc<CameraSetting>> {
        if let Some(setting) = self.find(DEFAULT_SETTING_KEY) {
            return Some(setting);
        }

        match self.settings.first() {
            Some(first) => {
                warn!(
                    "No '{}' camera setting, using first entry '{}'",
                    DEFAULT_SETTING_KEY, first.key_name
                );
                Some(first)
            }
            None => {
                error!("No camera settings defined");
                None
            }
        }
    }
}

impl SettingsStore for CameraConstants {
    fn resolve(&self, key: &str) -> Option<Arc<CameraSetting>> {
        self.get_setting(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constants(keys: &[&str]) -> CameraConstants {
        CameraConstants::new(keys.iter().map(|k| CameraSetting::named(*k)).collect())
    }

    #[test]
    fn test_exact_match_wins() {
        let constants = constants(&["Dungeon", "Default"]);
        assert_eq!(constants.get_setting("Dungeon").unwrap().key_name, "Dungeon");
    }

    #[test]
    fn test_unknown_falls_back_to_default() {
        let constants = constants(&["Dungeon", "Default"]);
        assert_eq!(constants.get_setting("Unknown").unwrap().key_name, "Default");
    }

    #[test]
    fn test_unknown_without_default_falls_back_to_first() {
        let constants = constants(&["Dungeon"]);
        assert_eq!(constants.get_setting("Unknown").unwrap().key_name, "Dungeon");
        assert_eq!(constants.get_default_setting().unwrap().key_name, "Dungeon");
    }

    #[test]
    fn test_empty_resolves_nothing() {
        let constants = CameraConstants::empty();
        assert!(constants.get_setting("anything").is_none());
        assert!(constants.get_default_setting().is_none());
        assert!(constants.resolve("Default").is_none());
    }

    #[test]
    fn test_duplicate_keys_first_match_wins() {
        let mut constants = CameraConstants::empty();
        constants.push(CameraSetting {
            field_of_view: 40.0,
            ..CameraSetting::named("Boss")
        });
        constants.push(CameraSetting {
            field_of_view: 90.0,
            ..CameraSetting::named("Boss")
        });
        assert_eq!(constants.get_setting("Boss").unwrap().field_of_view, 40.0);
    }

    #[test]
    fn test_resolve_shares_the_stored_setting() {
        let constants = constants(&["Default"]);
        let a = constants.resolve("Default").unwrap();
        let b = constants.resolve("Default").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_parse_toml_document() {
        let constants = CameraConstants::from_toml_str(
            r#"
            [[settings]]
            key_name = "Dungeon"
            position_offset = [0.0, 2.0, 4.0]
            field_of_view = 50.0

            [[settings]]
            key_name = "Default"
            field_of_view = 75.0
            "#,
        )
        .unwrap();
        assert_eq!(constants.len(), 2);
        let dungeon = constants.get_setting("Dungeon").unwrap();
        assert_eq!(dungeon.position_offset, glam::Vec3::new(0.0, 2.0, 4.0));
        assert_eq!(constants.get_default_setting().unwrap().field_of_view, 75.0);

        let again = CameraConstants::from_toml_str(&constants.to_toml_string().unwrap()).unwrap();
        assert_eq!(again.len(), 2);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = CameraConstants::load("/definitely/not/here/camera.toml").unwrap_err();
        assert!(matches!(err, CameraError::ConfigRead(..)));
    }
}

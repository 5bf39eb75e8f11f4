//! Camera behaviour profiles

use glam::Vec3;
use serde::{Deserialize, Serialize};
use vantage_core::Pose;

/// Key of the profile every lookup falls back to
pub const DEFAULT_SETTING_KEY: &str = "Default";

/// Blend parameters for one behavioural profile ("Dungeon", "Boss", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSetting {
    /// Name this profile is looked up by
    pub key_name: String,
    /// Rig position relative to the target, in the target's local frame
    pub position_offset: Vec3,
    /// Rig rotation relative to the target, Euler degrees (pitch, yaw, roll)
    pub rotation_offset: Vec3,
    /// Exponential approach rate for position (per second)
    pub follow_speed: f32,
    /// Exponential approach rate for rotation (per second)
    pub rotation_speed: f32,
    /// Base vertical field of view in degrees
    pub field_of_view: f32,
    /// Exponential approach rate for field of view (per second)
    pub fov_change_speed: f32,
}

impl Default for CameraSetting {
    fn default() -> Self {
        Self {
            key_name: DEFAULT_SETTING_KEY.to_string(),
            position_offset: Vec3::new(0.0, 3.0, 8.0),
            rotation_offset: Vec3::new(-15.0, 0.0, 0.0),
            follow_speed: 5.0,
            rotation_speed: 5.0,
            field_of_view: 60.0,
            fov_change_speed: 5.0,
        }
    }
}

impl CameraSetting {
    /// Create a profile with default blend parameters under the given key
    pub fn named(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            ..Default::default()
        }
    }

    /// The rig pose this profile wants for a target at `target`
    pub fn follow_pose(&self, target: &Pose) -> Pose {
        target.offset_by(self.position_offset, self.rotation_offset)
    }
}

//! Controller tuning that is not part of any camera profile

use serde::{Deserialize, Serialize};

/// Controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Field of view used when no profile resolves
    pub default_fov: f32,
    /// FOV approach rate used when no profile is active
    pub default_fov_change_speed: f32,
    /// The device FOV snaps to the target once within this many degrees
    pub fov_sync_epsilon: f32,
    /// Transition progress this close to 1.0 counts as finished
    pub progress_epsilon: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_fov: 60.0,
            default_fov_change_speed: 5.0,
            fov_sync_epsilon: 0.01,
            progress_epsilon: 1e-4,
        }
    }
}

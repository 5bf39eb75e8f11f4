use std::path::PathBuf;

/// Errors reported by the camera subsystem.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("camera device is missing")]
    MissingDevice,

    #[error("camera rig is missing")]
    MissingRig,

    #[error("camera settings source is missing")]
    MissingSettings,

    #[error("no camera setting could be resolved for '{0}'")]
    SettingsNotFound(String),

    #[error("camera controller is disabled")]
    Disabled,

    #[error("failed to read camera settings '{0}': {1}")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("failed to parse camera settings '{0}': {1}")]
    ConfigParse(PathBuf, String),
}

//! Vantage Camera - Camera rig control for the Vantage engine
//!
//! This crate drives a camera rig toward gameplay targets:
//! - Named behaviour profiles with fallback lookup (`CameraConstants`)
//! - Follow, timed transitions and temporary target diversions
//! - Scripted animations through a pluggable `RigAnimator`
//! - Decaying additive shake (`CameraShaker`)
//! - Field-of-view blending and a temporary additive offset layer

pub mod animator;
pub mod config;
pub mod constants;
pub mod controller;
pub mod device;
pub mod error;
pub mod mode;
pub mod rig;
pub mod setting;
pub mod shaker;

pub use animator::{AnimationClip, ClipAnimator, Keyframe, RigAnimator};
pub use config::ControllerConfig;
pub use constants::{CameraConstants, SettingsStore};
pub use controller::{CameraController, ControllerParts};
pub use device::{CameraDevice, PerspectiveCamera, PerspectiveConfig};
pub use error::CameraError;
pub use mode::{CameraEvent, CameraMode, OperationKind, Ticket};
pub use rig::Rig;
pub use setting::{CameraSetting, DEFAULT_SETTING_KEY};
pub use shaker::CameraShaker;

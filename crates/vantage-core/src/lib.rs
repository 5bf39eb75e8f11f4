//! Vantage Core - Shared types for the Vantage camera rig
//!
//! This crate provides the value types the camera subsystem is built on:
//! - Mathematical primitives (re-exported from glam)
//! - `Pose` for rigs, targets and cameras
//! - Owned/weak target handles
//! - Frame clock for host loops

pub mod clock;
pub mod pose;
pub mod target;

pub use clock::{ClockConfig, FrameClock};
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use pose::{euler_degrees, to_euler_degrees, Pose};
pub use target::{Target, TargetId, TargetRef};

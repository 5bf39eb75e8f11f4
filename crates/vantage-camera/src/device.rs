//! The renderer-side camera the controller drives

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use vantage_core::Pose;

/// A renderer camera: settable field of view, attached under the rig.
pub trait CameraDevice {
    /// Vertical field of view in degrees
    fn field_of_view(&self) -> f32;

    fn set_field_of_view(&mut self, degrees: f32);

    /// Whether the device is currently a child of the rig
    fn is_attached_to_rig(&self) -> bool;

    /// Parent the device under the rig
    fn attach_to_rig(&mut self);

    /// Pose of the device relative to the rig
    fn local_pose(&self) -> Pose;

    fn projection_matrix(&self) -> Mat4;

    /// Project a world point into viewport space.
    ///
    /// `x`/`y` are in `[0, 1]` when on screen, `z` is the distance in front of the
    /// camera (negative when behind it).
    fn world_to_viewport(&self, rig_world: &Pose, point: Vec3) -> Vec3 {
        let camera = rig_world.compose(&self.local_pose());
        let view_point = camera.view_matrix().transform_point3(point);
        let depth = -view_point.z;

        let clip = self.projection_matrix() * view_point.extend(1.0);
        if clip.w.abs() <= f32::EPSILON {
            return Vec3::new(0.5, 0.5, depth);
        }

        let ndc = clip.truncate() / clip.w;
        Vec3::new(ndc.x * 0.5 + 0.5, ndc.y * 0.5 + 0.5, depth)
    }
}

/// Projection parameters for [`PerspectiveCamera`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerspectiveConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveConfig {
    fn default() -> Self {
        Self {
            fov: 60.0,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Plain perspective camera implementing [`CameraDevice`]
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub config: PerspectiveConfig,
    local: Pose,
    attached: bool,
}

impl PerspectiveCamera {
    pub fn new(config: PerspectiveConfig) -> Self {
        Self {
            config,
            local: Pose::IDENTITY,
            attached: false,
        }
    }

    /// Offset the lens from the rig origin
    pub fn with_local_pose(mut self, local: Pose) -> Self {
        self.local = local;
        self
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.config.aspect_ratio = aspect_ratio;
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(PerspectiveConfig::default())
    }
}

impl CameraDevice for PerspectiveCamera {
    fn field_of_view(&self) -> f32 {
        self.config.fov
    }

    fn set_field_of_view(&mut self, degrees: f32) {
        self.config.fov = degrees;
    }

    fn is_attached_to_rig(&self) -> bool {
        self.attached
    }

    fn attach_to_rig(&mut self) {
        self.attached = true;
    }

    fn local_pose(&self) -> Pose {
        self.local
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov.to_radians(),
            self.config.aspect_ratio,
            self.config.near,
            self.config.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_point_ahead_projects_to_center() {
        let camera = PerspectiveCamera::default();
        let viewport = camera.world_to_viewport(&Pose::IDENTITY, Vec3::new(0.0, 0.0, -10.0));
        assert!((viewport.x - 0.5).abs() < 1e-4);
        assert!((viewport.y - 0.5).abs() < 1e-4);
        assert!((viewport.z - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_point_behind_has_negative_depth() {
        let camera = PerspectiveCamera::default();
        let viewport = camera.world_to_viewport(&Pose::IDENTITY, Vec3::new(0.0, 0.0, 10.0));
        assert!(viewport.z < 0.0);
    }

    #[test]
    fn test_point_to_the_side_leaves_viewport() {
        let camera = PerspectiveCamera::default();
        let viewport = camera.world_to_viewport(&Pose::IDENTITY, Vec3::new(100.0, 0.0, -1.0));
        assert!(viewport.x > 1.0);
    }

    #[test]
    fn test_rig_rotation_is_respected() {
        let camera = PerspectiveCamera::default();
        let rig = Pose::new(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::PI));
        let viewport = camera.world_to_viewport(&rig, Vec3::new(0.0, 0.0, 10.0));
        assert!((viewport.z - 10.0).abs() < 1e-3);
    }
}

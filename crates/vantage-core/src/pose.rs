//! Rigid pose (position + orientation) used for rigs, targets and cameras

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Euler order used by every degree-based offset: yaw (Y), then pitch (X), then roll (Z).
pub const EULER_ORDER: EulerRot = EulerRot::YXZ;

/// Build a rotation from Euler angles in degrees (`x` = pitch, `y` = yaw, `z` = roll).
pub fn euler_degrees(angles: Vec3) -> Quat {
    Quat::from_euler(
        EULER_ORDER,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

/// Decompose a rotation into Euler angles in degrees (`x` = pitch, `y` = yaw, `z` = roll).
pub fn to_euler_degrees(rotation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = rotation.to_euler(EULER_ORDER);
    Vec3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
}

/// Position and rotation without scale.
///
/// Poses are plain values: copying one never aliases another rig or target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create a pose from position and rotation
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a pose at the given position with no rotation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y in local space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Model matrix of this pose
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// View matrix for a camera placed at this pose
    pub fn view_matrix(&self) -> Mat4 {
        self.matrix().inverse()
    }

    /// Transform a pose expressed in this pose's local frame into the parent frame.
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * local.position,
            rotation: self.rotation * local.rotation,
        }
    }

    /// Inverse of [`Pose::compose`]: express `world` in this pose's local frame.
    pub fn localize(&self, world: &Pose) -> Pose {
        let inverse = self.rotation.inverse();
        Pose {
            position: inverse * (world.position - self.position),
            rotation: inverse * world.rotation,
        }
    }

    /// Offset this pose in its own frame.
    ///
    /// `position_offset` is rotated by this pose's rotation before being added;
    /// `rotation_offset_degrees` is post-multiplied as Euler degrees.
    pub fn offset_by(&self, position_offset: Vec3, rotation_offset_degrees: Vec3) -> Pose {
        Pose {
            position: self.position + self.rotation * position_offset,
            rotation: self.rotation * euler_degrees(rotation_offset_degrees),
        }
    }

    /// Interpolate between two poses (lerp for position, slerp for rotation).
    ///
    /// `t` is clamped to `[0, 1]`.
    pub fn lerp(a: &Pose, b: &Pose, t: f32) -> Pose {
        Self::blend(a, b, t, t)
    }

    /// Interpolate position and rotation with independent factors, each clamped to `[0, 1]`.
    pub fn blend(a: &Pose, b: &Pose, position_t: f32, rotation_t: f32) -> Pose {
        let position_t = position_t.clamp(0.0, 1.0);
        let rotation_t = rotation_t.clamp(0.0, 1.0);
        Pose {
            position: a.position.lerp(b.position, position_t),
            rotation: a.rotation.slerp(b.rotation, rotation_t).normalize(),
        }
    }

    /// Compare two poses within a tolerance (rotations compared up to sign).
    pub fn approx_eq(&self, other: &Pose, epsilon: f32) -> bool {
        self.position.abs_diff_eq(other.position, epsilon)
            && (1.0 - self.rotation.dot(other.rotation).abs()) <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_rotates_into_local_frame() {
        let pose = Pose::new(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let offset = pose.offset_by(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO);
        assert!(offset.position.abs_diff_eq(Vec3::new(-10.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn test_compose_then_localize() {
        let parent = Pose::new(Vec3::new(1.0, 2.0, 3.0), euler_degrees(Vec3::new(10.0, 45.0, 0.0)));
        let local = Pose::new(Vec3::new(0.0, 1.0, 0.5), euler_degrees(Vec3::new(0.0, 0.0, 20.0)));
        let world = parent.compose(&local);
        assert!(parent.localize(&world).approx_eq(&local, 1e-4));
    }

    #[test]
    fn test_euler_degrees_matches_axis_rotation() {
        let yaw = euler_degrees(Vec3::new(0.0, 90.0, 0.0));
        assert!((1.0 - yaw.dot(Quat::from_rotation_y(90f32.to_radians())).abs()) < 1e-6);

        let angles = to_euler_degrees(euler_degrees(Vec3::new(15.0, -30.0, 5.0)));
        assert!(angles.abs_diff_eq(Vec3::new(15.0, -30.0, 5.0), 1e-3));
    }

    #[test]
    fn test_lerp_clamps_factor() {
        let a = Pose::IDENTITY;
        let b = Pose::from_position(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(Pose::lerp(&a, &b, 2.0).position, b.position);
        assert_eq!(Pose::lerp(&a, &b, -1.0).position, a.position);
        assert!(Pose::lerp(&a, &b, 0.5).position.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-6));
    }
}

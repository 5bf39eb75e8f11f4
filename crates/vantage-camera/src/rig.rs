//! The pose container the camera device hangs from

use vantage_core::Pose;

/// Camera rig with a world pose and a local pose relative to an optional parent frame.
///
/// The controller writes the world pose; the shaker and animators work on the
/// local pose. Without a parent both are the same.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rig {
    parent: Pose,
    local: Pose,
}

impl Rig {
    pub fn new(world: Pose) -> Self {
        Self {
            parent: Pose::IDENTITY,
            local: world,
        }
    }

    /// Create a rig mounted under a parent frame (a vehicle, a moving platform)
    pub fn with_parent(parent: Pose, local: Pose) -> Self {
        Self { parent, local }
    }

    pub fn world(&self) -> Pose {
        self.parent.compose(&self.local)
    }

    pub fn set_world(&mut self, world: Pose) {
        self.local = self.parent.localize(&world);
    }

    pub fn local(&self) -> Pose {
        self.local
    }

    pub fn set_local(&mut self, local: Pose) {
        self.local = local;
    }

    pub fn parent(&self) -> Pose {
        self.parent
    }

    /// Move the parent frame, keeping the local pose
    pub fn set_parent(&mut self, parent: Pose) {
        self.parent = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn test_unparented_world_equals_local() {
        let mut rig = Rig::default();
        let pose = Pose::from_position(Vec3::new(1.0, 2.0, 3.0));
        rig.set_world(pose);
        assert_eq!(rig.local(), pose);
        assert_eq!(rig.world(), pose);
    }

    #[test]
    fn test_parented_world_round_trips_through_local() {
        let parent = Pose::new(Vec3::new(10.0, 0.0, 0.0), Quat::from_rotation_y(0.5));
        let mut rig = Rig::with_parent(parent, Pose::IDENTITY);
        let world = Pose::from_position(Vec3::new(0.0, 5.0, -10.0));
        rig.set_world(world);
        assert!(rig.world().approx_eq(&world, 1e-4));
        assert!(!rig.local().approx_eq(&world, 1e-2));
    }
}

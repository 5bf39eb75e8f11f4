//! Shared, externally owned pose sources the camera can follow
//!
//! A [`Target`] is owned by whatever spawned it (a player, an NPC, a cutscene
//! marker). The camera only ever holds a [`TargetRef`], which stops resolving
//! as soon as every owning handle has been dropped.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Pose;

/// Stable identity of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub Uuid);

impl TargetId {
    /// Create a new random target ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owning handle to a pose source.
///
/// Cloning shares the same pose; the target stays alive while any clone exists.
#[derive(Clone)]
pub struct Target {
    id: TargetId,
    name: Arc<str>,
    pose: Arc<RwLock<Pose>>,
}

impl Target {
    pub fn new(name: impl Into<Arc<str>>, pose: Pose) -> Self {
        Self {
            id: TargetId::new(),
            name: name.into(),
            pose: Arc::new(RwLock::new(pose)),
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current pose of the target
    pub fn pose(&self) -> Pose {
        *self.pose.read()
    }

    /// Move the target
    pub fn set_pose(&self, pose: Pose) {
        *self.pose.write() = pose;
    }

    /// Borrow a non-owning view of this target
    pub fn downgrade(&self) -> TargetRef {
        TargetRef {
            id: self.id,
            name: self.name.clone(),
            pose: Arc::downgrade(&self.pose),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("pose", &self.pose())
            .finish()
    }
}

/// Non-owning, read-only view of a [`Target`].
///
/// Equality is identity: two refs are equal when they point at the same target,
/// whether or not it is still alive.
#[derive(Clone)]
pub struct TargetRef {
    id: TargetId,
    name: Arc<str>,
    pose: Weak<RwLock<Pose>>,
}

impl TargetRef {
    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current pose, or `None` once the target has been dropped
    pub fn pose(&self) -> Option<Pose> {
        self.pose.upgrade().map(|pose| *pose.read())
    }

    pub fn is_alive(&self) -> bool {
        self.pose.strong_count() > 0
    }
}

impl PartialEq for TargetRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TargetRef {}

impl From<&Target> for TargetRef {
    fn from(target: &Target) -> Self {
        target.downgrade()
    }
}

impl fmt::Debug for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetRef({} '{}'", self.id, self.name)?;
        if !self.is_alive() {
            write!(f, ", dropped")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_ref_follows_owner_updates() {
        let target = Target::new("player", Pose::IDENTITY);
        let view = target.downgrade();
        target.set_pose(Pose::from_position(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(view.pose().map(|p| p.position), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_ref_dies_with_last_owner() {
        let target = Target::new("npc", Pose::IDENTITY);
        let clone = target.clone();
        let view = target.downgrade();
        drop(target);
        assert!(view.is_alive());
        drop(clone);
        assert!(!view.is_alive());
        assert!(view.pose().is_none());
    }

    #[test]
    fn test_equality_is_identity() {
        let a = Target::new("same", Pose::IDENTITY);
        let b = Target::new("same", Pose::IDENTITY);
        assert_eq!(a.downgrade(), TargetRef::from(&a));
        assert_ne!(a.downgrade(), b.downgrade());
    }
}

//! Additive camera shake with linear decay
//!
//! Every frame the rig's local pose is rebuilt from the snapshot taken when
//! the shake started, so the displacement never accumulates and the rig ends
//! exactly where it began.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};
use vantage_core::{euler_degrees, to_euler_degrees, Pose};

use crate::rig::Rig;

/// Pitch/yaw jitter in degrees at intensity 1.0
const PITCH_YAW_DEGREES: f32 = 0.5;

/// Roll jitter in degrees at intensity 1.0
const ROLL_DEGREES: f32 = 1.5;

/// Perturbs a rig's local pose for a bounded time.
pub struct CameraShaker {
    base_duration: f32,
    base_intensity: f32,
    time_remaining: f32,
    /// Local pose captured when the current shake started
    snapshot: Option<Pose>,
    rng: StdRng,
}

impl CameraShaker {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a shaker with a deterministic random sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            base_duration: 0.0,
            base_intensity: 0.0,
            time_remaining: 0.0,
            snapshot: None,
            rng,
        }
    }

    /// Start shaking `rig` for `duration` seconds.
    ///
    /// A running shake is undone first, so the new snapshot is the undisturbed pose.
    pub fn shake(&mut self, rig: &mut Rig, duration: f32, intensity: f32) {
        let valid = duration.is_finite()
            && intensity.is_finite()
            && duration > 0.0
            && intensity > 0.0;
        if !valid {
            warn!(
                "Ignoring shake with duration {} and intensity {}",
                duration, intensity
            );
            return;
        }

        if self.is_shaking() {
            debug!("Restarting shake, restoring previous snapshot");
            self.restore(rig);
        }

        self.snapshot = Some(rig.local());
        self.base_duration = duration;
        self.base_intensity = intensity;
        self.time_remaining = duration;
    }

    /// Advance the shake. Returns `false` once it has finished and the rig is restored.
    pub fn update_shake(&mut self, rig: &mut Rig, delta: f32) -> bool {
        if self.time_remaining <= 0.0 {
            return false;
        }
        let Some(origin) = self.snapshot else {
            self.reset();
            return false;
        };

        let intensity = self.base_intensity * (self.time_remaining / self.base_duration);

        let offset = self.random_in_unit_sphere() * intensity;
        let jitter = Vec3::new(
            self.rng.gen_range(-1.0..=1.0) * PITCH_YAW_DEGREES,
            self.rng.gen_range(-1.0..=1.0) * PITCH_YAW_DEGREES,
            self.rng.gen_range(-1.0..=1.0) * ROLL_DEGREES,
        ) * intensity;

        rig.set_local(Pose {
            position: origin.position + offset,
            rotation: euler_degrees(to_euler_degrees(origin.rotation) + jitter),
        });

        self.time_remaining -= delta.max(0.0);
        if self.time_remaining <= 0.0 {
            self.restore(rig);
            return false;
        }
        true
    }

    /// End the shake immediately, restoring the snapshot
    pub fn stop(&mut self, rig: &mut Rig) {
        if self.is_shaking() {
            self.restore(rig);
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.time_remaining > 0.0
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining.max(0.0)
    }

    fn restore(&mut self, rig: &mut Rig) {
        if let Some(origin) = self.snapshot {
            rig.set_local(origin);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.base_duration = 0.0;
        self.base_intensity = 0.0;
        self.time_remaining = 0.0;
        self.snapshot = None;
    }

    fn random_in_unit_sphere(&mut self) -> Vec3 {
        loop {
            let candidate = Vec3::new(
                self.rng.gen_range(-1.0..=1.0),
                self.rng.gen_range(-1.0..=1.0),
                self.rng.gen_range(-1.0..=1.0),
            );
            if candidate.length_squared() <= 1.0 {
                return candidate;
            }
        }
    }
}

impl Default for CameraShaker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn start_pose() -> Pose {
        Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.3))
    }

    #[test]
    fn test_shake_restores_exact_snapshot() {
        let mut rig = Rig::new(start_pose());
        let mut shaker = CameraShaker::with_seed(7);
        shaker.shake(&mut rig, 0.5, 1.0);
        assert!(shaker.is_shaking());

        let mut frames = 0;
        while shaker.update_shake(&mut rig, 0.125) {
            frames += 1;
            assert!(frames < 100);
        }

        assert!(!shaker.is_shaking());
        assert_eq!(rig.local(), start_pose());
    }

    #[test]
    fn test_displacement_bounded_by_decaying_intensity() {
        let mut rig = Rig::new(start_pose());
        let mut shaker = CameraShaker::with_seed(42);
        shaker.shake(&mut rig, 1.0, 2.0);

        let mut remaining = 1.0;
        while remaining > 0.0 {
            let bound = 2.0 * remaining;
            let still = shaker.update_shake(&mut rig, 0.25);
            if still {
                let displacement = (rig.local().position - start_pose().position).length();
                assert!(displacement <= bound + 1e-4, "{} > {}", displacement, bound);
            }
            remaining -= 0.25;
        }
        assert_eq!(rig.local(), start_pose());
    }

    #[test]
    fn test_restart_restores_previous_snapshot_first() {
        let mut rig = Rig::new(start_pose());
        let mut shaker = CameraShaker::with_seed(3);
        shaker.shake(&mut rig, 2.0, 1.0);
        shaker.update_shake(&mut rig, 0.125);
        assert_ne!(rig.local(), start_pose());

        shaker.shake(&mut rig, 1.0, 0.5);
        assert_eq!(rig.local(), start_pose());

        while shaker.update_shake(&mut rig, 0.25) {}
        assert_eq!(rig.local(), start_pose());
    }

    #[test]
    fn test_stop_restores_immediately() {
        let mut rig = Rig::new(start_pose());
        let mut shaker = CameraShaker::with_seed(11);
        shaker.shake(&mut rig, 5.0, 3.0);
        shaker.update_shake(&mut rig, 0.1);
        shaker.stop(&mut rig);
        assert!(!shaker.is_shaking());
        assert_eq!(rig.local(), start_pose());
        assert!(!shaker.update_shake(&mut rig, 0.1));
    }

    #[test]
    fn test_invalid_arguments_are_ignored() {
        let mut rig = Rig::new(start_pose());
        let mut shaker = CameraShaker::with_seed(1);
        shaker.shake(&mut rig, 0.0, 1.0);
        shaker.shake(&mut rig, 1.0, -1.0);
        shaker.shake(&mut rig, f32::NAN, 1.0);
        shaker.shake(&mut rig, f32::INFINITY, 1.0);
        shaker.shake(&mut rig, 1.0, f32::NAN);
        assert!(!shaker.is_shaking());
        assert!(!shaker.update_shake(&mut rig, 0.1));
        assert_eq!(rig.local(), start_pose());
    }
}

//! Frame timing for the host loop driving the camera
//!
//! The camera itself only consumes a delta per tick; this clock turns raw
//! wall-clock deltas into the scaled, clamped values it expects.

use serde::{Deserialize, Serialize};

/// Configuration for frame timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// How many camera seconds pass per real second
    pub time_scale: f32,
    /// Maximum delta handed to a single tick (hitches are clamped to this)
    pub max_delta: f32,
    /// Step used when running headless
    pub fixed_step: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta: 0.1,
            fixed_step: 1.0 / 60.0,
        }
    }
}

/// Per-frame delta tracking
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    pub config: ClockConfig,
    /// Scaled time since start in seconds
    pub elapsed: f64,
    /// Scaled, clamped delta for the current frame
    pub delta: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Whether time is frozen
    pub paused: bool,
}

impl FrameClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Advance by a raw delta and return the delta to feed the camera
    pub fn tick(&mut self, raw_delta: f32) -> f32 {
        self.frame_count += 1;

        if self.paused || !raw_delta.is_finite() || raw_delta <= 0.0 {
            self.delta = 0.0;
            return 0.0;
        }

        self.delta = raw_delta.min(self.config.max_delta) * self.config.time_scale;
        self.elapsed += self.delta as f64;
        self.delta
    }

    /// Advance by the configured fixed step
    pub fn tick_fixed(&mut self) -> f32 {
        self.tick(self.config.fixed_step)
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Set the time scale (0.0 = frozen, 1.0 = normal)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_clamps_hitches() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(2.0), clock.config.max_delta);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn test_pause_and_scale() {
        let mut clock = FrameClock::default();
        clock.set_time_scale(0.5);
        assert!((clock.tick(0.05) - 0.025).abs() < 1e-6);

        clock.pause();
        assert_eq!(clock.tick(0.05), 0.0);
        clock.resume();
        assert!(clock.tick(0.05) > 0.0);
    }

    #[test]
    fn test_rejects_negative_delta() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(-1.0), 0.0);
        assert_eq!(clock.tick(f32::NAN), 0.0);
    }
}

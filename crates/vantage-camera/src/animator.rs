//! Animation players that can take over the rig

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vantage_core::Pose;

use crate::rig::Rig;

/// An animation player allowed to drive the rig while the controller is `Animating`.
///
/// The controller never asks whether a clip has finished; it hands the rig
/// back after the duration it was given.
pub trait RigAnimator {
    /// Start playing a named clip from the rig's current pose
    fn play(&mut self, clip: &str, rig: &Rig);

    /// Drive the rig for one frame
    fn animate(&mut self, rig: &mut Rig, delta: f32);

    /// Called when the controller takes the rig back
    fn stop(&mut self) {}
}

/// A pose offset at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    /// Offset relative to the rig's local pose when the clip started
    pub offset: Pose,
}

/// Keyframed offset track
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationClip {
    keyframes: Vec<Keyframe>,
}

impl AnimationClip {
    pub fn new(mut keyframes: Vec<Keyframe>) -> Self {
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keyframes }
    }

    /// Length of the clip in seconds
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map_or(0.0, |k| k.time)
    }

    /// Sample the offset at `time`, holding the first/last keyframe outside the track
    pub fn sample(&self, time: f32) -> Pose {
        let (Some(first), Some(last)) = (self.keyframes.first(), self.keyframes.last()) else {
            return Pose::IDENTITY;
        };
        if time <= first.time {
            return first.offset;
        }
        if time >= last.time {
            return last.offset;
        }

        let next = self
            .keyframes
            .iter()
            .position(|k| k.time > time)
            .unwrap_or(self.keyframes.len() - 1);
        let a = &self.keyframes[next - 1];
        let b = &self.keyframes[next];
        let span = b.time - a.time;
        let t = if span > 0.0 { (time - a.time) / span } else { 1.0 };
        Pose::lerp(&a.offset, &b.offset, t)
    }
}

struct Playback {
    clip: String,
    elapsed: f32,
    origin: Pose,
}

/// Plays named [`AnimationClip`]s on the rig's local pose.
#[derive(Default)]
pub struct ClipAnimator {
    clips: HashMap<String, AnimationClip>,
    playing: Option<Playback>,
}

impl ClipAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip under a name, replacing any previous clip with that name
    pub fn add_clip(&mut self, name: impl Into<String>, clip: AnimationClip) {
        self.clips.insert(name.into(), clip);
    }

    pub fn with_clip(mut self, name: impl Into<String>, clip: AnimationClip) -> Self {
        self.add_clip(name, clip);
        self
    }

    /// Name of the clip currently playing
    pub fn current_clip(&self) -> Option<&str> {
        self.playing.as_ref().map(|p| p.clip.as_str())
    }
}

impl RigAnimator for ClipAnimator {
    fn play(&mut self, clip: &str, rig: &Rig) {
        if !self.clips.contains_key(clip) {
            warn!("Unknown camera animation clip '{}'", clip);
            self.playing = None;
            return;
        }
        debug!("Playing camera animation '{}'", clip);
        self.playing = Some(Playback {
            clip: clip.to_string(),
            elapsed: 0.0,
            origin: rig.local(),
        });
    }

    fn animate(&mut self, rig: &mut Rig, delta: f32) {
        let Some(playback) = self.playing.as_mut() else {
            return;
        };
        let Some(clip) = self.clips.get(&playback.clip) else {
            return;
        };
        playback.elapsed += delta;
        rig.set_local(playback.origin.compose(&clip.sample(playback.elapsed)));
    }

    fn stop(&mut self) {
        self.playing = None;
    }
}

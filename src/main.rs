//! Vantage - Headless camera rig demo
//!
//! Runs a scripted sequence of follows, target switches, temporary diversions,
//! animations and shakes against the camera controller and logs what it reports.

mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vantage_camera::{
    AnimationClip, CameraController, CameraEvent, CameraShaker, ClipAnimator, ControllerParts,
    Keyframe, PerspectiveCamera, Rig,
};
use vantage_core::{FrameClock, Pose, Target};

use crate::settings::{load_camera_profiles, AppSettings};

/// Something the script asks the camera to do
#[derive(Debug, Clone, Copy)]
enum Cue {
    Switch(&'static str, f32),
    Temporary(&'static str, f32, f32, f32),
    Animate(&'static str, f32),
    Shake(f32, f32),
    Profile(&'static str),
    Offset(Vec3, f32, f32),
    Despawn(&'static str),
}

/// Demo state
struct DemoApp {
    controller: CameraController,
    clock: FrameClock,
    targets: Vec<Target>,
    script: Vec<(f32, Cue)>,
    next_cue: usize,
}

impl DemoApp {
    fn new(controller: CameraController, clock: FrameClock, targets: Vec<Target>) -> Self {
        let script = vec![
            (1.0, Cue::Switch("chest", 1.5)),
            (3.5, Cue::Temporary("boss", 1.0, 2.0, 1.0)),
            (8.0, Cue::Shake(0.75, 0.6)),
            (9.0, Cue::Profile("Boss")),
            (9.5, Cue::Animate("flyover", 2.0)),
            (12.0, Cue::Offset(Vec3::new(0.5, 0.0, 0.0), -5.0, 1.5)),
            (14.0, Cue::Despawn("chest")),
        ];
        Self {
            controller,
            clock,
            targets,
            script,
            next_cue: 0,
        }
    }

    fn find(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name() == name)
    }

    fn run_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Switch(name, duration) => {
                let target = self.find(name).map(Target::downgrade);
                let ticket = self.controller.switch_target(target, duration);
                info!("Switching to '{}' ({})", name, ticket);
            }
            Cue::Temporary(name, in_time, hold, out_time) => {
                let target = self.find(name).map(Target::downgrade);
                let ticket = self
                    .controller
                    .switch_target_temporary(target, in_time, hold, out_time);
                info!("Glancing at '{}' ({})", name, ticket);
            }
            Cue::Animate(clip, duration) => {
                let ticket = self.controller.play_animation(clip, duration);
                info!("Playing '{}' ({})", clip, ticket);
            }
            Cue::Shake(duration, intensity) => {
                info!("Shaking for {}s at {}", duration, intensity);
                self.controller.start_shake(duration, intensity);
            }
            Cue::Profile(key) => {
                if let Ok(setting) = self.controller.load_settings(key) {
                    info!("Camera profile is now '{}'", setting.key_name);
                }
            }
            Cue::Offset(position, fov, duration) => {
                info!("Applying temporary offset for {}s", duration);
                self.controller
                    .apply_temporary_offset(position, Quat::IDENTITY, fov, duration);
            }
            Cue::Despawn(name) => {
                info!("Despawning '{}'", name);
                self.targets.retain(|t| t.name() != name);
            }
        }
    }

    fn update(&mut self) {
        let delta = self.clock.tick_fixed();
        let elapsed = self.clock.elapsed as f32;

        // The player walks a slow circle around the origin.
        if let Some(player) = self.find("player") {
            let angle = elapsed * 0.4;
            let position = Vec3::new(angle.cos() * 6.0, 0.0, angle.sin() * 6.0);
            player.set_pose(Pose::new(position, Quat::from_rotation_y(-angle)));
        }

        while let Some(&(at, cue)) = self.script.get(self.next_cue) {
            if at > elapsed {
                break;
            }
            self.run_cue(cue);
            self.next_cue += 1;
        }

        for event in self.controller.update(delta) {
            log_event(&event);
        }

        if self.clock.frame_count % 60 == 0 {
            let world = self.controller.rig().world();
            debug!(
                "t={:.2}s mode={} position={:?} fov={:?} visible={}",
                elapsed,
                self.controller.mode(),
                world.position,
                self.controller.device_fov(),
                self.controller.is_target_visible()
            );
        }
    }
}

fn log_event(event: &CameraEvent) {
    match event {
        CameraEvent::ModeChanged { from, to } => info!("Camera mode {} -> {}", from, to),
        CameraEvent::Completed { ticket, kind } => info!("{:?} {} completed", kind, ticket),
        CameraEvent::Interrupted { ticket, kind } => info!("{:?} {} interrupted", kind, ticket),
        CameraEvent::TargetLost { target } => match target {
            Some(id) => info!("Camera lost target {}", id),
            None => info!("Camera lost its target"),
        },
    }
}

fn flyover() -> AnimationClip {
    AnimationClip::new(vec![
        Keyframe {
            time: 0.0,
            offset: Pose::IDENTITY,
        },
        Keyframe {
            time: 1.0,
            offset: Pose::new(Vec3::new(0.0, 6.0, 4.0), Quat::from_rotation_x(-0.4)),
        },
        Keyframe {
            time: 2.0,
            offset: Pose::new(Vec3::new(8.0, 3.0, 0.0), Quat::from_rotation_y(0.6)),
        },
    ])
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Vantage camera demo...");

    let settings = AppSettings::load();
    let profiles_path = std::env::args().nth(1).map(PathBuf::from);
    let profiles = load_camera_profiles(profiles_path.as_deref());

    let targets = vec![
        Target::new("player", Pose::IDENTITY),
        Target::new("chest", Pose::from_position(Vec3::new(12.0, 0.0, -6.0))),
        Target::new(
            "boss",
            Pose::new(Vec3::new(-10.0, 2.0, -20.0), Quat::from_rotation_y(1.2)),
        ),
    ];

    let shaker = settings
        .demo
        .shake_seed
        .map_or_else(CameraShaker::new, CameraShaker::with_seed);
    let parts = ControllerParts::new(
        PerspectiveCamera::default(),
        Rig::default(),
        Arc::new(profiles),
    )
    .with_animator(ClipAnimator::new().with_clip("flyover", flyover()))
    .with_shaker(shaker);

    let mut controller = CameraController::with_config(settings.controller.clone());
    controller
        .initialize(parts, &settings.demo.initial_setting)
        .context("Failed to initialize camera controller")?;
    controller.set_target(targets.first().map(Target::downgrade));

    // A paused or zero-scale clock never reaches the end on its own.
    let max_frames = (settings.demo.duration / settings.clock.fixed_step.max(1e-3)).ceil() as u64 * 2;

    let mut app = DemoApp::new(controller, FrameClock::new(settings.clock.clone()), targets);
    while (app.clock.elapsed as f32) < settings.demo.duration && app.clock.frame_count < max_frames
    {
        app.update();
    }

    let world = app.controller.rig().world();
    info!(
        "Demo finished after {} frames in mode {} at {:?}",
        app.clock.frame_count,
        app.controller.mode(),
        world.position
    );
    Ok(())
}

//! Camera controller state machine
//!
//! The controller owns the rig and a mode pose. Each `update` advances exactly
//! one mode handler, blends the device field of view, and layers the additive
//! offset on top of the mode pose unless an animation or shake owns the rig.
//! Completion of timed operations is reported through [`CameraEvent`]s that the
//! host drains after the call, never through callbacks.

use std::sync::Arc;

use glam::{Quat, Vec3};
use tracing::{debug, error, info, warn};
use vantage_core::{Pose, TargetRef};

use crate::animator::RigAnimator;
use crate::config::ControllerConfig;
use crate::constants::SettingsStore;
use crate::device::CameraDevice;
use crate::error::CameraError;
use crate::mode::{CameraEvent, CameraMode, OperationKind, Ticket};
use crate::rig::Rig;
use crate::setting::{CameraSetting, DEFAULT_SETTING_KEY};
use crate::shaker::CameraShaker;

/// Dependencies handed to [`CameraController::initialize`].
///
/// Device, rig and settings are required; the animator and shaker are optional.
#[derive(Default)]
pub struct ControllerParts {
    pub device: Option<Box<dyn CameraDevice>>,
    pub rig: Option<Rig>,
    pub animator: Option<Box<dyn RigAnimator>>,
    pub settings: Option<Arc<dyn SettingsStore>>,
    pub shaker: Option<CameraShaker>,
}

impl ControllerParts {
    /// Required parts plus a default shaker
    pub fn new(
        device: impl CameraDevice + 'static,
        rig: Rig,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            device: Some(Box::new(device)),
            rig: Some(rig),
            animator: None,
            settings: Some(settings),
            shaker: Some(CameraShaker::new()),
        }
    }

    pub fn with_animator(mut self, animator: impl RigAnimator + 'static) -> Self {
        self.animator = Some(Box::new(animator));
        self
    }

    pub fn with_shaker(mut self, shaker: CameraShaker) -> Self {
        self.shaker = Some(shaker);
        self
    }
}

/// What happens when a transition reaches its target
enum Continuation {
    /// Report the ticket as completed
    Notify(Ticket, OperationKind),
    /// Start holding a temporary target
    BeginHold(TemporaryTarget),
}

struct Transition {
    from: Option<TargetRef>,
    to: Option<TargetRef>,
    start: Pose,
    duration: f32,
    progress: f32,
    on_complete: Continuation,
}

struct TemporaryTarget {
    /// Target to return to once the hold expires
    original: Option<TargetRef>,
    hold_remaining: f32,
    out_time: f32,
    ticket: Ticket,
}

struct Animation {
    remaining: f32,
    ticket: Ticket,
}

/// Position/rotation perturbation layered over the mode pose
#[derive(Debug, Clone, Copy)]
struct AdditiveOffset {
    position: Vec3,
    rotation: Quat,
    /// Seconds left; zero while active means "until cleared"
    remaining: f32,
    active: bool,
}

impl Default for AdditiveOffset {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            remaining: 0.0,
            active: false,
        }
    }
}

/// Drives a camera rig between follow, transition, hold, animation and shake modes.
pub struct CameraController {
    /// Configuration
    pub config: ControllerConfig,
    enabled: bool,
    device: Option<Box<dyn CameraDevice>>,
    rig: Rig,
    animator: Option<Box<dyn RigAnimator>>,
    shaker: Option<CameraShaker>,
    settings: Option<Arc<dyn SettingsStore>>,
    /// Used for offsets and speeds while no profile has been resolved
    fallback_setting: CameraSetting,
    active_setting: Option<Arc<CameraSetting>>,

    mode: CameraMode,
    /// Base mode special modes return to; never a special mode
    previous_base_mode: CameraMode,
    current_target: Option<TargetRef>,
    /// Mode pose, without the additive offset
    pose: Pose,

    base_target_fov: f32,
    temporary_fov_offset: f32,
    current_actual_fov: f32,

    transition: Option<Transition>,
    temporary: Option<TemporaryTarget>,
    animation: Option<Animation>,
    offset: AdditiveOffset,

    next_ticket: u64,
    events: Vec<CameraEvent>,
}

impl CameraController {
    /// Create a disabled controller; call [`CameraController::initialize`] before use
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    /// Create a disabled controller with custom config
    pub fn with_config(config: ControllerConfig) -> Self {
        let fov = config.default_fov;
        Self {
            config,
            enabled: false,
            device: None,
            rig: Rig::default(),
            animator: None,
            shaker: None,
            settings: None,
            fallback_setting: CameraSetting::default(),
            active_setting: None,
            mode: CameraMode::Idle,
            previous_base_mode: CameraMode::Idle,
            current_target: None,
            pose: Pose::IDENTITY,
            base_target_fov: fov,
            temporary_fov_offset: 0.0,
            current_actual_fov: fov,
            transition: None,
            temporary: None,
            animation: None,
            offset: AdditiveOffset::default(),
            next_ticket: 0,
            events: Vec::new(),
        }
    }

    /// Create and initialize a controller with the `"Default"` profile
    pub fn from_parts(parts: ControllerParts) -> Result<Self, CameraError> {
        let mut controller = Self::new();
        controller.initialize(parts, DEFAULT_SETTING_KEY)?;
        Ok(controller)
    }

    /// Wire dependencies and resolve the initial profile.
    ///
    /// On a missing device, rig or settings source the controller stays disabled:
    /// every later operation is a no-op.
    pub fn initialize(
        &mut self,
        parts: ControllerParts,
        initial_key: &str,
    ) -> Result<(), CameraError> {
        self.abandon_pending();
        self.enabled = false;

        let ControllerParts {
            device,
            rig,
            animator,
            settings,
            shaker,
        } = parts;

        let Some(mut device) = device else {
            error!("Camera controller disabled: no camera device");
            return Err(CameraError::MissingDevice);
        };
        let Some(rig) = rig else {
            error!("Camera controller disabled: no camera rig");
            return Err(CameraError::MissingRig);
        };
        let Some(settings) = settings else {
            error!("Camera controller disabled: no camera settings source");
            return Err(CameraError::MissingSettings);
        };

        if !device.is_attached_to_rig() {
            debug!("Attaching camera device to rig");
            device.attach_to_rig();
        }

        self.active_setting = settings.resolve(initial_key);
        match &self.active_setting {
            Some(setting) => {
                info!("Camera initialized with setting '{}'", setting.key_name);
                self.base_target_fov = setting.field_of_view;
            }
            None => {
                error!(
                    "No camera setting resolved for '{}', using default FOV {}",
                    initial_key, self.config.default_fov
                );
                self.base_target_fov = self.config.default_fov;
            }
        }

        self.offset = AdditiveOffset::default();
        self.temporary_fov_offset = 0.0;
        self.refresh_fov();
        device.set_field_of_view(self.current_actual_fov);

        self.rig = rig;
        self.pose = rig.world();
        self.device = Some(device);
        self.animator = animator;
        self.shaker = shaker;
        self.settings = Some(settings);
        self.current_target = None;
        self.mode = CameraMode::Idle;
        self.previous_base_mode = CameraMode::Idle;
        self.enabled = true;
        Ok(())
    }

    /// Switch to another profile by key. State is unchanged on error.
    pub fn load_settings(&mut self, key: &str) -> Result<Arc<CameraSetting>, CameraError> {
        if !self.enabled {
            return Err(CameraError::Disabled);
        }
        let Some(store) = &self.settings else {
            return Err(CameraError::MissingSettings);
        };
        let Some(setting) = store.resolve(key) else {
            warn!("Failed to load camera setting '{}'", key);
            return Err(CameraError::SettingsNotFound(key.to_string()));
        };

        info!("Loaded camera setting '{}'", setting.key_name);
        self.base_target_fov = setting.field_of_view;
        self.active_setting = Some(setting.clone());
        self.refresh_fov();
        Ok(setting)
    }

    /// Retarget immediately, snapping the rig to the new follow pose
    pub fn set_target(&mut self, target: Option<TargetRef>) {
        if !self.enabled {
            return;
        }

        match self.mode {
            CameraMode::Animating | CameraMode::Shaking => {
                // The special mode keeps the rig; only where it returns to changes.
                self.previous_base_mode = if target.as_ref().is_some_and(TargetRef::is_alive) {
                    CameraMode::Following
                } else {
                    CameraMode::Idle
                };
                self.current_target = target;
                return;
            }
            CameraMode::TransitioningToTarget | CameraMode::HoldingTemporaryTarget => {
                self.abandon_pending();
            }
            CameraMode::Idle | CameraMode::Following => {}
        }

        self.current_target = target;
        match self.follow_pose() {
            Some(goal) => {
                self.pose = goal;
                self.set_mode(CameraMode::Following);
                self.present();
            }
            None => self.set_mode(CameraMode::Idle),
        }
    }

    /// Blend to a new target over `duration` seconds.
    ///
    /// A non-positive duration retargets immediately. The returned ticket is
    /// reported exactly once, as completed or interrupted.
    pub fn switch_target(&mut self, target: Option<TargetRef>, duration: f32) -> Ticket {
        let ticket = self.issue_ticket();
        self.begin_switch(
            target,
            duration,
            Continuation::Notify(ticket, OperationKind::TargetSwitch),
        );
        ticket
    }

    /// Blend to `target`, hold it for `hold_time`, then blend back over `out_time`.
    ///
    /// The ticket completes once the camera is back on the original target.
    pub fn switch_target_temporary(
        &mut self,
        target: Option<TargetRef>,
        in_time: f32,
        hold_time: f32,
        out_time: f32,
    ) -> Ticket {
        let ticket = self.issue_ticket();
        let Some(target) = target.filter(|_| self.enabled) else {
            debug!("Ignoring temporary target switch");
            self.complete(ticket, OperationKind::TemporaryTarget);
            return ticket;
        };

        // A diversion started during another one returns to the first original.
        let original = match (&self.temporary, &self.transition) {
            (Some(temporary), _) => temporary.original.clone(),
            (
                None,
                Some(Transition {
                    on_complete: Continuation::BeginHold(temporary),
                    ..
                }),
            ) => temporary.original.clone(),
            _ => self.current_target.clone(),
        };

        self.begin_switch(
            Some(target),
            in_time,
            Continuation::BeginHold(TemporaryTarget {
                original,
                hold_remaining: hold_time,
                out_time,
                ticket,
            }),
        );
        ticket
    }

    /// Hand the rig to the animator for `duration` seconds
    pub fn play_animation(&mut self, clip: &str, duration: f32) -> Ticket {
        let ticket = self.issue_ticket();
        if !self.enabled || self.animator.is_none() || duration <= 0.0 {
            debug!(
                "Ignoring camera animation '{}' (duration {})",
                clip, duration
            );
            self.complete(ticket, OperationKind::Animation);
            return ticket;
        }

        self.abandon_pending();
        self.stop_shake();
        self.store_previous_mode();

        if let Some(animator) = self.animator.as_mut() {
            animator.play(clip, &self.rig);
        }
        self.animation = Some(Animation {
            remaining: duration,
            ticket,
        });
        self.set_mode(CameraMode::Animating);
        ticket
    }

    /// Shake the rig for `duration` seconds with linearly decaying `intensity`
    pub fn start_shake(&mut self, duration: f32, intensity: f32) {
        let valid = duration.is_finite()
            && intensity.is_finite()
            && duration > 0.0
            && intensity > 0.0;
        if !self.enabled || self.shaker.is_none() || !valid {
            debug!(
                "Ignoring camera shake (duration {}, intensity {})",
                duration, intensity
            );
            return;
        }

        self.abandon_pending();
        self.store_previous_mode();

        if let Some(shaker) = self.shaker.as_mut() {
            shaker.shake(&mut self.rig, duration, intensity);
        }
        self.set_mode(CameraMode::Shaking);
    }

    /// Set the profile-independent base field of view
    pub fn set_base_target_fov(&mut self, fov: f32) {
        self.base_target_fov = fov;
        self.refresh_fov();
    }

    /// Layer a position/rotation/FOV offset over the mode pose.
    ///
    /// A non-positive `duration` keeps the offset until [`Self::clear_temporary_offset`].
    pub fn apply_temporary_offset(
        &mut self,
        position: Vec3,
        rotation: Quat,
        fov_offset: f32,
        duration: f32,
    ) {
        self.offset = AdditiveOffset {
            position,
            rotation: rotation.normalize(),
            remaining: duration.max(0.0),
            active: true,
        };
        self.temporary_fov_offset = fov_offset;
        self.refresh_fov();
    }

    pub fn clear_temporary_offset(&mut self) {
        self.offset = AdditiveOffset::default();
        self.temporary_fov_offset = 0.0;
        self.refresh_fov();
    }

    /// Advance the controller by one frame and return the events it produced
    pub fn update(&mut self, delta: f32) -> Vec<CameraEvent> {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        if !self.enabled || self.device.is_none() {
            return self.drain_events();
        }

        if matches!(
            self.mode,
            CameraMode::Following | CameraMode::HoldingTemporaryTarget
        ) && !self.has_live_target()
        {
            let lost = self.current_target.take().map(|t| t.id());
            warn!("Camera target lost, falling back to Idle");
            self.abandon_pending();
            self.events.push(CameraEvent::TargetLost { target: lost });
            self.set_mode(CameraMode::Idle);
        }

        self.tick_temporary_offset(delta);
        self.blend_fov(delta);

        match self.mode {
            CameraMode::Idle => self.present(),
            CameraMode::Following => self.update_following(delta),
            CameraMode::TransitioningToTarget => self.update_transition(delta),
            CameraMode::HoldingTemporaryTarget => self.update_holding(delta),
            CameraMode::Animating => self.update_animating(delta),
            CameraMode::Shaking => self.update_shaking(delta),
        }

        self.drain_events()
    }

    /// Take events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<CameraEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the current target is in front of the camera and inside the viewport
    pub fn is_target_visible(&self) -> bool {
        let (Some(device), Some(target)) = (&self.device, &self.current_target) else {
            return false;
        };
        let Some(pose) = target.pose() else {
            return false;
        };

        let viewport = device.world_to_viewport(&self.rig.world(), pose.position);
        viewport.z > 0.0
            && (0.0..=1.0).contains(&viewport.x)
            && (0.0..=1.0).contains(&viewport.y)
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn active_setting(&self) -> Option<&CameraSetting> {
        self.active_setting.as_deref()
    }

    pub fn current_settings_key(&self) -> Option<&str> {
        self.active_setting.as_ref().map(|s| s.key_name.as_str())
    }

    pub fn current_target(&self) -> Option<&TargetRef> {
        self.current_target.as_ref()
    }

    pub fn base_target_fov(&self) -> f32 {
        self.base_target_fov
    }

    pub fn temporary_fov_offset(&self) -> f32 {
        self.temporary_fov_offset
    }

    /// Field of view the device is blending toward (base + temporary offset)
    pub fn current_actual_fov(&self) -> f32 {
        self.current_actual_fov
    }

    /// Field of view currently set on the device
    pub fn device_fov(&self) -> Option<f32> {
        self.device.as_ref().map(|d| d.field_of_view())
    }

    pub fn is_temporary_offset_active(&self) -> bool {
        self.offset.active
    }

    /// Mode pose, without the additive offset or shake
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Progress of the running transition in `[0, 1]`
    pub fn transition_progress(&self) -> Option<f32> {
        self.transition.as_ref().map(|t| t.progress)
    }

    fn setting(&self) -> &CameraSetting {
        self.active_setting
            .as_deref()
            .unwrap_or(&self.fallback_setting)
    }

    fn has_live_target(&self) -> bool {
        self.current_target
            .as_ref()
            .is_some_and(TargetRef::is_alive)
    }

    /// Follow pose for the current target under the active profile
    fn follow_pose(&self) -> Option<Pose> {
        self.pose_for(self.current_target.as_ref())
    }

    fn pose_for(&self, target: Option<&TargetRef>) -> Option<Pose> {
        target
            .and_then(TargetRef::pose)
            .map(|pose| self.setting().follow_pose(&pose))
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    fn complete(&mut self, ticket: Ticket, kind: OperationKind) {
        self.events.push(CameraEvent::Completed { ticket, kind });
    }

    fn interrupt(&mut self, ticket: Ticket, kind: OperationKind) {
        debug!("Camera operation {} interrupted", ticket);
        self.events.push(CameraEvent::Interrupted { ticket, kind });
    }

    fn finish(&mut self, continuation: Continuation) {
        match continuation {
            Continuation::Notify(ticket, kind) => self.complete(ticket, kind),
            Continuation::BeginHold(temporary) => {
                debug!("Holding temporary target for {}s", temporary.hold_remaining);
                self.abandon_pending();
                self.stop_shake();
                self.store_previous_mode();
                self.temporary = Some(temporary);
                self.set_mode(CameraMode::HoldingTemporaryTarget);
            }
        }
    }

    fn cancel(&mut self, continuation: Continuation) {
        match continuation {
            Continuation::Notify(ticket, kind) => self.interrupt(ticket, kind),
            Continuation::BeginHold(temporary) => {
                self.interrupt(temporary.ticket, OperationKind::TemporaryTarget)
            }
        }
    }

    fn begin_switch(
        &mut self,
        target: Option<TargetRef>,
        duration: f32,
        continuation: Continuation,
    ) {
        if !self.enabled {
            self.complete_disabled(continuation);
            return;
        }

        if self.current_target.is_none() && target.is_none() {
            debug!("Switch between two empty targets, nothing to do");
            self.finish(continuation);
            return;
        }
        if self.mode != CameraMode::TransitioningToTarget && target == self.current_target {
            debug!("Already on requested target");
            self.finish(continuation);
            return;
        }

        if duration <= 0.0 {
            self.set_target(target);
            self.finish(continuation);
            return;
        }

        self.abandon_pending();
        self.stop_shake();
        self.store_previous_mode();

        debug!(
            "Transitioning to {:?} over {}s",
            target.as_ref().map(TargetRef::name),
            duration
        );
        self.transition = Some(Transition {
            from: self.current_target.clone(),
            to: target,
            start: self.pose,
            duration,
            progress: 0.0,
            on_complete: continuation,
        });
        self.set_mode(CameraMode::TransitioningToTarget);
    }

    fn complete_disabled(&mut self, continuation: Continuation) {
        match continuation {
            Continuation::Notify(ticket, kind) => self.complete(ticket, kind),
            Continuation::BeginHold(temporary) => {
                self.complete(temporary.ticket, OperationKind::TemporaryTarget)
            }
        }
    }

    /// Drop in-flight transition, hold and animation work, reporting their tickets
    fn abandon_pending(&mut self) {
        if let Some(transition) = self.transition.take() {
            self.cancel(transition.on_complete);
        }
        if let Some(temporary) = self.temporary.take() {
            self.interrupt(temporary.ticket, OperationKind::TemporaryTarget);
        }
        if let Some(animation) = self.animation.take() {
            self.interrupt(animation.ticket, OperationKind::Animation);
            if let Some(animator) = self.animator.as_mut() {
                animator.stop();
            }
            self.pose = self.strip_offset(self.rig.world());
        }
    }

    fn stop_shake(&mut self) {
        if self.mode != CameraMode::Shaking {
            return;
        }
        if let Some(shaker) = self.shaker.as_mut() {
            shaker.stop(&mut self.rig);
        }
    }

    fn store_previous_mode(&mut self) {
        if self.mode.is_base() {
            self.previous_base_mode = self.mode;
        }
    }

    fn restored_base_mode(&self) -> CameraMode {
        match self.previous_base_mode {
            CameraMode::Idle => CameraMode::Idle,
            _ => CameraMode::Following,
        }
    }

    fn set_mode(&mut self, mode: CameraMode) {
        if self.mode == mode {
            return;
        }
        debug!("Camera mode {} -> {}", self.mode, mode);
        self.events.push(CameraEvent::ModeChanged {
            from: self.mode,
            to: mode,
        });
        self.mode = mode;
        if mode.is_base() {
            self.previous_base_mode = mode;
        }
    }

    /// Return to the remembered base mode, snapping to the follow pose when following
    fn resume_base_mode(&mut self) {
        let next = self.restored_base_mode();
        self.set_mode(next);
        if next == CameraMode::Following {
            if let Some(goal) = self.follow_pose() {
                self.pose = goal;
                self.present();
            }
        }
    }

    fn refresh_fov(&mut self) {
        self.current_actual_fov = self.base_target_fov + self.temporary_fov_offset;
    }

    fn blend_fov(&mut self, delta: f32) {
        let rate = self
            .active_setting
            .as_ref()
            .map_or(self.config.default_fov_change_speed, |s| s.fov_change_speed);
        let target = self.current_actual_fov;
        let epsilon = self.config.fov_sync_epsilon;
        let Some(device) = self.device.as_mut() else {
            return;
        };

        let current = device.field_of_view();
        if current == target {
            return;
        }
        let t = (rate * delta).clamp(0.0, 1.0);
        let mut next = current + (target - current) * t;
        if (next - target).abs() <= epsilon {
            next = target;
        }
        device.set_field_of_view(next);
    }

    fn tick_temporary_offset(&mut self, delta: f32) {
        if !self.offset.active || self.offset.remaining <= 0.0 {
            return;
        }
        self.offset.remaining -= delta;
        if self.offset.remaining <= 0.0 {
            debug!("Temporary camera offset expired");
            self.clear_temporary_offset();
        }
    }

    fn apply_offset(&self, pose: Pose) -> Pose {
        if !self.offset.active {
            return pose;
        }
        Pose {
            position: pose.position + pose.rotation * self.offset.position,
            rotation: pose.rotation * self.offset.rotation,
        }
    }

    fn strip_offset(&self, pose: Pose) -> Pose {
        if !self.offset.active {
            return pose;
        }
        let rotation = pose.rotation * self.offset.rotation.inverse();
        Pose {
            position: pose.position - rotation * self.offset.position,
            rotation,
        }
    }

    /// Write the mode pose plus additive offset to the rig
    fn present(&mut self) {
        let world = self.apply_offset(self.pose);
        self.rig.set_world(world);
    }

    fn update_following(&mut self, delta: f32) {
        if let Some(goal) = self.follow_pose() {
            let setting = self.setting();
            let position_t = setting.follow_speed * delta;
            let rotation_t = setting.rotation_speed * delta;
            self.pose = Pose::blend(&self.pose, &goal, position_t, rotation_t);
        }
        self.present();
    }

    fn update_transition(&mut self, delta: f32) {
        let epsilon = self.config.progress_epsilon;
        let Some(transition) = self.transition.as_mut() else {
            warn!("Transition mode without a transition, resuming base mode");
            self.resume_base_mode();
            return;
        };

        transition.progress = if transition.duration > 0.0 {
            (transition.progress + delta / transition.duration).min(1.0)
        } else {
            1.0
        };
        if transition.progress >= 1.0 - epsilon {
            transition.progress = 1.0;
        }

        let progress = transition.progress;
        let start = transition.start;
        let from = transition.from.clone();
        let to = transition.to.clone();

        let end = self
            .pose_for(to.as_ref())
            .or_else(|| self.pose_for(from.as_ref()))
            .unwrap_or(start);

        self.pose = if progress >= 1.0 {
            end
        } else {
            Pose::lerp(&start, &end, progress)
        };
        self.present();

        if progress < 1.0 {
            return;
        }
        let Some(transition) = self.transition.take() else {
            return;
        };
        self.current_target = transition.to;
        let next = if self.has_live_target() {
            CameraMode::Following
        } else {
            CameraMode::Idle
        };
        self.set_mode(next);
        self.finish(transition.on_complete);
    }

    fn update_holding(&mut self, delta: f32) {
        self.update_following(delta);

        let Some(temporary) = self.temporary.as_mut() else {
            warn!("Holding mode without a temporary target, resuming base mode");
            self.resume_base_mode();
            return;
        };
        temporary.hold_remaining -= delta;
        if temporary.hold_remaining > 0.0 {
            return;
        }
        let Some(temporary) = self.temporary.take() else {
            return;
        };

        debug!("Temporary hold expired, returning to original target");
        self.previous_base_mode = CameraMode::Following;
        if temporary.original == self.current_target {
            self.set_mode(CameraMode::Following);
            self.complete(temporary.ticket, OperationKind::TemporaryTarget);
            return;
        }
        self.begin_switch(
            temporary.original,
            temporary.out_time,
            Continuation::Notify(temporary.ticket, OperationKind::TemporaryTarget),
        );
    }

    fn update_animating(&mut self, delta: f32) {
        if let Some(animator) = self.animator.as_mut() {
            animator.animate(&mut self.rig, delta);
        }

        let Some(animation) = self.animation.as_mut() else {
            warn!("Animating mode without an animation, resuming base mode");
            self.resume_base_mode();
            return;
        };
        animation.remaining -= delta;
        if animation.remaining > 0.0 {
            return;
        }
        let Some(animation) = self.animation.take() else {
            return;
        };

        if let Some(animator) = self.animator.as_mut() {
            animator.stop();
        }
        self.pose = self.strip_offset(self.rig.world());
        self.complete(animation.ticket, OperationKind::Animation);
        self.resume_base_mode();
    }

    fn update_shaking(&mut self, delta: f32) {
        let shaking = match self.shaker.as_mut() {
            Some(shaker) => shaker.update_shake(&mut self.rig, delta),
            None => false,
        };
        if !shaking {
            self.resume_base_mode();
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

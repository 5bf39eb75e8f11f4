//! Controller modes and the events the controller reports to its host

use std::fmt;

use vantage_core::TargetId;

/// Controller mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CameraMode {
    /// Rig left where it is
    #[default]
    Idle,
    /// Rig blends toward the current target every frame
    Following,
    /// Timed blend from a start pose to a new target
    TransitioningToTarget,
    /// An external animator owns the rig
    Animating,
    /// The shaker owns the rig's local pose
    Shaking,
    /// Following a temporary target until the hold timer runs out
    HoldingTemporaryTarget,
}

impl CameraMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Following => "Following",
            Self::TransitioningToTarget => "TransitioningToTarget",
            Self::Animating => "Animating",
            Self::Shaking => "Shaking",
            Self::HoldingTemporaryTarget => "HoldingTemporaryTarget",
        }
    }

    /// Resting modes that special modes return to
    pub fn is_base(&self) -> bool {
        matches!(self, Self::Idle | Self::Following)
    }

    pub fn is_special(&self) -> bool {
        !self.is_base()
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle identifying one operation's completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub(crate) u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which operation a ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// `switch_target`
    TargetSwitch,
    /// `switch_target_temporary`, reported after the return leg
    TemporaryTarget,
    /// `play_animation`
    Animation,
}

/// Something the host may want to react to, drained after each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraEvent {
    ModeChanged { from: CameraMode, to: CameraMode },
    /// The operation ran to completion (or completed immediately)
    Completed { ticket: Ticket, kind: OperationKind },
    /// The operation was superseded before it finished
    Interrupted { ticket: Ticket, kind: OperationKind },
    /// The followed target was dropped; the controller fell back to `Idle`
    TargetLost { target: Option<TargetId> },
}

impl CameraEvent {
    /// Ticket carried by completion/interruption events
    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            Self::Completed { ticket, .. } | Self::Interrupted { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }
}

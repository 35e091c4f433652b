//! Event type definitions for the golf event bus

use crate::clubs::Club;
use crate::motion::PermissionState;

/// Why a swing did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingAim,
    InProgress,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::MissingAim => write!(f, "missing_aim"),
            RejectReason::InProgress => write!(f, "in_progress"),
        }
    }
}

/// All golf events that can be logged
#[derive(Debug, Clone, PartialEq)]
pub enum GolfEvent {
    /// Drawing began near the ball
    AimStarted { source: String },
    /// Drawing finished with a base angle (degrees)
    AimCompleted { angle: f64 },
    /// Contact too far from the ball, or a second source while drawing
    AimIgnored { source: String, x: f64, y: f64 },
    SwingStarted {
        club: Club,
        base_angle: f64,
        final_angle: f64,
        strength: f64,
        distance: f64,
        target: (f64, f64),
        motion: bool,
    },
    SwingFinished { position: (f64, f64), frames: u32 },
    SwingRejected { reason: RejectReason },
    ClubChanged { club: Club },
    MotionPermission { state: PermissionState },
    SettingsReloaded,
}

impl GolfEvent {
    /// 2-char type code used by the compact log format
    pub fn type_code(&self) -> &'static str {
        match self {
            GolfEvent::AimStarted { .. } => "AS",
            GolfEvent::AimCompleted { .. } => "AC",
            GolfEvent::AimIgnored { .. } => "AI",
            GolfEvent::SwingStarted { .. } => "SS",
            GolfEvent::SwingFinished { .. } => "SF",
            GolfEvent::SwingRejected { .. } => "SR",
            GolfEvent::ClubChanged { .. } => "CC",
            GolfEvent::MotionPermission { .. } => "MP",
            GolfEvent::SettingsReloaded => "RL",
        }
    }

    /// Variant name, as used by scenario expectations
    pub fn name(&self) -> &'static str {
        match self {
            GolfEvent::AimStarted { .. } => "AimStarted",
            GolfEvent::AimCompleted { .. } => "AimCompleted",
            GolfEvent::AimIgnored { .. } => "AimIgnored",
            GolfEvent::SwingStarted { .. } => "SwingStarted",
            GolfEvent::SwingFinished { .. } => "SwingFinished",
            GolfEvent::SwingRejected { .. } => "SwingRejected",
            GolfEvent::ClubChanged { .. } => "ClubChanged",
            GolfEvent::MotionPermission { .. } => "MotionPermission",
            GolfEvent::SettingsReloaded => "SettingsReloaded",
        }
    }

    /// High-frequency events are logged at debug level
    pub fn is_verbose(&self) -> bool {
        matches!(self, GolfEvent::AimIgnored { .. })
    }
}

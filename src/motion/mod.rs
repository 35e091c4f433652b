//! Motion sensor input - permission gating and the latest acceleration sample
//!
//! A sensor never blocks play: until a source is granted, or when it is
//! denied or missing, swings use the simulated sampler instead.

mod source;

pub use source::*;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One acceleration reading from the device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub acceleration_x: f64,
    pub acceleration_y: f64,
}

impl MotionSample {
    pub fn new(acceleration_x: f64, acceleration_y: f64) -> Self {
        Self {
            acceleration_x,
            acceleration_y,
        }
    }
}

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Not asked yet, or the platform has not answered
    #[default]
    Pending,
    Granted,
    Denied,
    Unavailable,
}

impl PermissionState {
    /// Whether the gate will never accept samples this session
    pub fn is_final_refusal(&self) -> bool {
        matches!(self, PermissionState::Denied | PermissionState::Unavailable)
    }
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PermissionState::Pending => "pending",
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
            PermissionState::Unavailable => "unavailable",
        };
        write!(f, "{}", name)
    }
}

/// Tracks permission and holds the most recent sample (last write wins)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionGate {
    permission: PermissionState,
    requested: bool,
    latest: Option<MotionSample>,
}

impl MotionGate {
    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn latest(&self) -> Option<&MotionSample> {
        self.latest.as_ref()
    }

    /// Record a permission answer. Returns true when the state changed.
    /// A refusal is final and later answers are ignored.
    pub fn set_permission(&mut self, state: PermissionState) -> bool {
        if self.permission.is_final_refusal() || self.permission == state {
            return false;
        }
        self.permission = state;
        match state {
            PermissionState::Granted => info!("Motion sensor granted, using device swings"),
            PermissionState::Denied => {
                warn!("Motion sensor permission denied, using simulated swings")
            }
            PermissionState::Unavailable => {
                info!("No motion sensor available, using simulated swings")
            }
            PermissionState::Pending => {}
        }
        true
    }

    /// Store a sample if the sensor has been granted
    pub fn accept(&mut self, sample: MotionSample) -> bool {
        if self.permission != PermissionState::Granted {
            return false;
        }
        self.latest = Some(sample);
        true
    }

    /// Drive a source through permission and drain its samples.
    /// Returns Some(state) when the permission state changed this call.
    pub fn poll(&mut self, source: &mut dyn MotionSource) -> Option<PermissionState> {
        let mut changed = None;

        if self.permission == PermissionState::Pending {
            let answer = if !self.requested {
                self.requested = true;
                if source.requires_permission() {
                    source.request_permission()
                } else if source.is_available() {
                    PermissionState::Granted
                } else {
                    PermissionState::Unavailable
                }
            } else {
                source.poll_permission()
            };
            if self.set_permission(answer) {
                changed = Some(answer);
            }
        }

        if self.permission == PermissionState::Granted {
            for sample in source.poll_samples() {
                self.accept(sample);
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_rejected_until_granted() {
        let mut gate = MotionGate::default();
        assert!(!gate.accept(MotionSample::new(3.0, 1.0)));
        assert!(gate.latest().is_none());

        gate.set_permission(PermissionState::Granted);
        assert!(gate.accept(MotionSample::new(3.0, 1.0)));
        assert!(gate.accept(MotionSample::new(7.0, -2.0)));
        assert_eq!(gate.latest(), Some(&MotionSample::new(7.0, -2.0)));
    }

    #[test]
    fn test_denial_is_final() {
        let mut gate = MotionGate::default();
        assert!(gate.set_permission(PermissionState::Denied));
        assert!(!gate.set_permission(PermissionState::Granted));
        assert_eq!(gate.permission(), PermissionState::Denied);
        assert!(!gate.accept(MotionSample::new(1.0, 1.0)));
    }

    #[test]
    fn test_poll_without_sensor_is_unavailable() {
        let mut gate = MotionGate::default();
        let mut source = NoMotionSensor;
        assert_eq!(gate.poll(&mut source), Some(PermissionState::Unavailable));
        assert_eq!(gate.poll(&mut source), None);
        assert!(gate.latest().is_none());
    }

    #[test]
    fn test_poll_waits_for_async_permission() {
        let mut gate = MotionGate::default();
        let mut source = ScriptedMotion::new(vec![MotionSample::new(4.0, 0.5)])
            .with_permission(PermissionState::Granted)
            .answer_after(2);

        assert_eq!(gate.poll(&mut source), None);
        assert!(gate.latest().is_none());
        assert_eq!(gate.poll(&mut source), None);
        assert_eq!(gate.poll(&mut source), Some(PermissionState::Granted));
        assert_eq!(gate.latest(), Some(&MotionSample::new(4.0, 0.5)));
    }

    #[test]
    fn test_poll_drains_newest_sample() {
        let mut gate = MotionGate::default();
        let mut source = ScriptedMotion::new(vec![
            MotionSample::new(1.0, 0.0),
            MotionSample::new(2.0, 0.0),
        ]);
        gate.poll(&mut source);
        assert_eq!(gate.latest(), Some(&MotionSample::new(2.0, 0.0)));
    }
}
